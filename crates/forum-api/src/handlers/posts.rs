//! Post handlers
//!
//! Endpoints for editing posts and toggling likes.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{LikeResponse, PostResponse, UpdatePostRequest};
use forum_service::PostService;

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Edit a post (authors may only edit their own posts)
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.update_post(auth.user_id, post_id, request).await?;
    Ok(Json(response))
}

/// Like a post
///
/// PUT /posts/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<LikeResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.like_post(auth.user_id, post_id).await?;
    Ok(Json(response))
}

/// Remove a like from a post
///
/// DELETE /posts/{post_id}/like
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<LikeResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.unlike_post(auth.user_id, post_id).await?;
    Ok(Json(response))
}
