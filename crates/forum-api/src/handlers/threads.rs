//! Thread handlers
//!
//! Endpoints for creating, listing, and reading threads plus replies.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{
    CreatePostRequest, CreateThreadRequest, PagedResponse, PostResponse, ThreadDetailResponse,
    ThreadSummaryResponse,
};
use forum_service::ThreadService;

use crate::extractors::{AuthUser, CategoryIdPath, OptionalAuthUser, Pagination, ThreadIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a thread with its first post
///
/// POST /threads
pub async fn create_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateThreadRequest>,
) -> ApiResult<Created<Json<ThreadDetailResponse>>> {
    let service = ThreadService::new(state.service_context());
    let response = service.create_thread(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List threads in a category, pinned first
///
/// GET /categories/{category_id}/threads
pub async fn list_threads(
    State(state): State<AppState>,
    Path(path): Path<CategoryIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<PagedResponse<ThreadSummaryResponse>>> {
    let category_id = path.category_id()?;

    let service = ThreadService::new(state.service_context());
    let threads = service
        .list_by_category(category_id, pagination.page, pagination.limit)
        .await?;
    Ok(Json(threads))
}

/// Get a thread with one page of its posts
///
/// Views are counted at most once per authenticated viewer.
///
/// GET /threads/{thread_id}
pub async fn get_thread(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(path): Path<ThreadIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<ThreadDetailResponse>> {
    let thread_id = path.thread_id()?;

    let service = ThreadService::new(state.service_context());
    let response = service
        .get_thread(
            thread_id,
            viewer.map(|v| v.user_id),
            pagination.page,
            pagination.limit,
        )
        .await?;
    Ok(Json(response))
}

/// Reply to a thread
///
/// POST /threads/{thread_id}/posts
pub async fn create_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ThreadIdPath>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let thread_id = path.thread_id()?;

    let service = ThreadService::new(state.service_context());
    let response = service.reply(auth.user_id, thread_id, request).await?;
    Ok(Created(Json(response)))
}
