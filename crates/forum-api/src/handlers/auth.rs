//! Authentication handlers
//!
//! Endpoints for Discord login, logout, and token refresh.

use axum::{extract::State, Json};
use axum_extra::{headers::UserAgent, TypedHeader};
use forum_service::dto::{AuthResponse, DiscordLoginRequest, LogoutRequest, RefreshTokenRequest};
use forum_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Login with a verified Discord identity
///
/// POST /auth/login/discord
pub async fn login_discord(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<DiscordLoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let device_info = user_agent.map(|TypedHeader(ua)| ua.as_str().to_string());
    let service = AuthService::new(state.service_context());
    let response = service.login_with_discord(request, device_info).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Logout user
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Option<Json<LogoutRequest>>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    let request = body.map(|Json(r)| r).unwrap_or_default();
    service.logout(auth.user_id, request).await?;
    Ok(NoContent)
}
