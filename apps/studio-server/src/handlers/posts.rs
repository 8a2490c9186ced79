//! Post handlers - save, list, delete and status changes.

use actix_web::{HttpResponse, web};

use postcraft_core::domain::{Platform, Post, PostStatus};
use postcraft_shared::dto::{SavePostRequest, UpdateStatusRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts - store order, newest saved first.
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.posts.list().await)
}

/// GET /api/calendar - sorted by creation time, newest first.
pub async fn calendar(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.posts.calendar().await)
}

/// POST /api/posts - save an approved draft.
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<SavePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest("Post content must not be empty".to_string()));
    }
    let platform: Platform = req.platform.parse()?;
    let image_url = req.image_url.filter(|url| !url.trim().is_empty());

    let post = Post::new(platform, req.content, req.hashtags, image_url);
    state.posts.add(post.clone()).await?;

    tracing::info!(post_id = %post.id, %platform, "Draft saved");
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id} - deleting an unknown id is a no-op.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state.posts.remove(&id).await?;

    tracing::info!(post_id = %id, removed, "Post delete");
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/posts/{id}/status - unknown ids are a no-op.
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let status: PostStatus = body.into_inner().status.parse()?;
    let updated = state.posts.update_status(&id, status).await?;

    tracing::info!(post_id = %id, %status, updated, "Post status update");
    Ok(HttpResponse::NoContent().finish())
}
