//! Audit log handlers
//!
//! Read access to the moderation audit trail.

use axum::{
    extract::{Query, State},
    Json,
};
use forum_service::dto::{AuditLogQuery, AuditPageResponse};
use forum_service::AuditService;

use crate::extractors::{AuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Search the audit log (staff only)
///
/// Non-staff callers receive an empty page with `authorized: false`
/// instead of an error.
///
/// GET /audit-log
pub async fn search_audit_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AuditLogQuery>,
    pagination: Pagination,
) -> ApiResult<Json<AuditPageResponse>> {
    let service = AuditService::new(state.service_context());
    let response = service
        .search(auth.user_id, &query, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}
