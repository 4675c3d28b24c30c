//! Site settings handlers
//!
//! Public branding values plus admin-only management.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{SettingResponse, UpsertSettingRequest};
use forum_service::SettingsService;

use crate::extractors::{AuthUser, SettingKeyPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List public-scope settings
///
/// GET /settings
pub async fn public_settings(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SettingResponse>>> {
    let service = SettingsService::new(state.service_context());
    let settings = service.public_settings().await?;
    Ok(Json(settings))
}

/// List all settings regardless of scope (admin only)
///
/// GET /settings/all
pub async fn list_all_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SettingResponse>>> {
    let service = SettingsService::new(state.service_context());
    let settings = service.list_all(auth.user_id).await?;
    Ok(Json(settings))
}

/// Insert or replace a setting (admin only)
///
/// PUT /settings
pub async fn upsert_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertSettingRequest>,
) -> ApiResult<Json<SettingResponse>> {
    let service = SettingsService::new(state.service_context());
    let response = service.upsert_setting(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a setting (admin only)
///
/// DELETE /settings/{key}
pub async fn delete_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SettingKeyPath>,
) -> ApiResult<NoContent> {
    let service = SettingsService::new(state.service_context());
    service.delete_setting(auth.user_id, path.key()).await?;
    Ok(NoContent)
}
