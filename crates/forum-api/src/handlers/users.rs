//! User handlers
//!
//! Endpoints for user profiles, warnings, and account deletion.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{CurrentUserResponse, UserResponse, WarningResponse};
use forum_service::UserService;

use crate::extractors::{AuthUser, UserIdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get the authenticated user's profile
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Delete the authenticated user's account (anonymize in place)
///
/// DELETE /users/@me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_own_account(auth.user_id).await?;
    Ok(NoContent)
}

/// Get a user's public profile
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Get a user's warning history (staff only)
///
/// GET /users/{user_id}/warnings
pub async fn list_warnings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<WarningResponse>>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let warnings = service.list_warnings(auth.user_id, user_id).await?;
    Ok(Json(warnings))
}
