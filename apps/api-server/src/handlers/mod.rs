//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::{HttpRequest, error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/profile", web::get().to(auth::profile)),
                )
                // Blog routes; literal segments before `{id}`
                .service(
                    web::scope("/blogs")
                        .route("/", web::get().to(posts::list_public))
                        .route("/my-blogs/", web::get().to(posts::list_own))
                        .route("/create/", web::post().to(posts::create))
                        .route("/{id}/", web::get().to(posts::get_public))
                        .route("/{id}/update/", web::put().to(posts::update))
                        .route("/{id}/update/", web::patch().to(posts::update))
                        .route("/{id}/delete/", web::delete().to(posts::delete)),
                ),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}

/// Unparseable ids are reported like any other missing post.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err: error::PathError, _req: &HttpRequest| {
        AppError::NotFound("Post not found".to_string()).into()
    })
}
