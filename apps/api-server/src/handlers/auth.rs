//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quire_core::domain::User;
use quire_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use quire_core::projection::AuthorSummary;
use quire_shared::FieldIssue;
use quire_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn issue(field: &str, message: &str) -> FieldIssue {
    FieldIssue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn validate_registration(req: &RegisterUserRequest) -> AppResult<()> {
    let mut issues = Vec::new();
    if req.email.trim().is_empty() || !req.email.contains('@') {
        issues.push(issue("email", "Enter a valid email address."));
    }
    if req.username.trim().is_empty() {
        issues.push(issue("username", "This field may not be blank."));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(issue(
            "password",
            "Ensure this field has at least 8 characters.",
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(issues))
    }
}

fn token_response(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let issued = token_service
        .issue(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_registration(&req)?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(
        req.email,
        req.username,
        req.first_name,
        req.last_name,
        password_hash,
    );
    let saved_user = state.users.save(user).await?;
    tracing::info!(user_id = %saved_user.id, "User registered");

    Ok(HttpResponse::Created().json(token_response(token_service.get_ref().as_ref(), &saved_user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(token_response(token_service.get_ref().as_ref(), &user)?))
}

/// GET /api/auth/profile - Protected route
pub async fn profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    tracing::debug!(username = %identity.username, "Profile requested");

    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(AuthorSummary::from(&user)))
}
