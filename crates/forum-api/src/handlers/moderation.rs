//! Moderation handlers
//!
//! Every moderation endpoint answers HTTP 200 with a flat
//! `{success, message}` outcome; failures carry the refusal reason in
//! `message` so the UI can render it inline next to the control.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{
    BanUserRequest, ChangeRoleRequest, ModerationOutcome, MuteUserRequest, SetFlagRequest,
    WarnUserRequest,
};
use forum_service::{ModerationService, ServiceResult};

use crate::extractors::{AuthUser, PostIdPath, ThreadIdPath, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Collapse a service result into the flat moderation outcome
fn flatten(result: ServiceResult<ModerationOutcome>) -> Json<ModerationOutcome> {
    match result {
        Ok(outcome) => Json(outcome),
        Err(err) => Json(ModerationOutcome::failed(err.to_string())),
    }
}

/// Pin or unpin a thread
///
/// POST /threads/{thread_id}/pin
pub async fn set_thread_pinned(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ThreadIdPath>,
    Json(request): Json<SetFlagRequest>,
) -> ApiResult<Json<ModerationOutcome>> {
    let thread_id = path.thread_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(
        service
            .set_thread_pinned(auth.user_id, thread_id, request.value)
            .await,
    ))
}

/// Lock or unlock a thread
///
/// POST /threads/{thread_id}/lock
pub async fn set_thread_locked(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ThreadIdPath>,
    Json(request): Json<SetFlagRequest>,
) -> ApiResult<Json<ModerationOutcome>> {
    let thread_id = path.thread_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(
        service
            .set_thread_locked(auth.user_id, thread_id, request.value)
            .await,
    ))
}

/// Delete a thread and all of its posts
///
/// DELETE /threads/{thread_id}
pub async fn delete_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ThreadIdPath>,
) -> ApiResult<Json<ModerationOutcome>> {
    let thread_id = path.thread_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(service.delete_thread(auth.user_id, thread_id).await))
}

/// Delete a single post (the first post of a thread is refused)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ModerationOutcome>> {
    let post_id = path.post_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(service.delete_post(auth.user_id, post_id).await))
}

/// Ban a user, optionally with an expiry
///
/// POST /users/{user_id}/ban
pub async fn ban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<BanUserRequest>,
) -> ApiResult<Json<ModerationOutcome>> {
    let user_id = path.user_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(
        service
            .ban_user(auth.user_id, user_id, request.reason, request.duration_secs)
            .await,
    ))
}

/// Lift a user's ban
///
/// POST /users/{user_id}/unban
pub async fn unban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ModerationOutcome>> {
    let user_id = path.user_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(service.unban_user(auth.user_id, user_id).await))
}

/// Mute a user for a fixed duration
///
/// POST /users/{user_id}/mute
pub async fn mute_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<MuteUserRequest>,
) -> ApiResult<Json<ModerationOutcome>> {
    let user_id = path.user_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(
        service
            .mute_user(auth.user_id, user_id, request.reason, request.duration_secs)
            .await,
    ))
}

/// Lift a user's mute
///
/// POST /users/{user_id}/unmute
pub async fn unmute_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ModerationOutcome>> {
    let user_id = path.user_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(service.unmute_user(auth.user_id, user_id).await))
}

/// Record a formal warning against a user
///
/// POST /users/{user_id}/warn
pub async fn warn_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<WarnUserRequest>,
) -> ApiResult<Json<ModerationOutcome>> {
    let user_id = path.user_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(
        service.warn_user(auth.user_id, user_id, request.reason).await,
    ))
}

/// Change a user's role (admin only)
///
/// PATCH /users/{user_id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    Json(request): Json<ChangeRoleRequest>,
) -> ApiResult<Json<ModerationOutcome>> {
    let user_id = path.user_id()?;

    let service = ModerationService::new(state.service_context());
    Ok(flatten(
        service.change_role(auth.user_id, user_id, &request.role).await,
    ))
}
