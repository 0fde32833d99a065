//! Blog post handlers. Each one resolves the caller and hands off to `PostService`,
//! which applies the guards and scoped queries.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quire_core::domain::{PostChanges, PostDraft};
use quire_core::pagination::{Page, PageRequest};
use quire_shared::Paginated;
use quire_shared::dto::{CreatePostRequest, ListPostsQuery, PageQuery, UpdatePostRequest};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn page_request(query: PageQuery, default_size: u64) -> PageRequest {
    PageRequest::new(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(default_size),
    )
}

fn paginated<T>(page: Page<T>) -> Paginated<T> {
    Paginated {
        count: page.total,
        next: page.next_page(),
        previous: page.previous_page(),
        results: page.items,
    }
}

/// GET /api/blogs/?search=<term>&page=<n>
pub async fn list_public(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = page_request(query.page_query(), state.page_size);

    let found = state.posts.list_public(query.search.as_deref(), page).await?;

    Ok(HttpResponse::Ok().json(paginated(found)))
}

/// GET /api/blogs/{id}/
pub async fn get_public(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_public(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/blogs/create/
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
        is_published: req.is_published,
    };

    let post = state.posts.create(&identity.caller(), draft).await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT|PATCH /api/blogs/{id}/update/
pub async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        is_published: req.is_published,
    };

    let echo = state
        .posts
        .update_own(&identity.caller(), path.into_inner(), changes)
        .await?;

    Ok(HttpResponse::Ok().json(echo))
}

/// DELETE /api/blogs/{id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete_own(&identity.caller(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/blogs/my-blogs/
pub async fn list_own(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_request(query.into_inner(), state.page_size);

    let found = state.posts.list_own(&identity.caller(), page).await?;

    Ok(HttpResponse::Ok().json(paginated(found)))
}
