//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use forum_core::value_objects::LocalizedText;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response with page-number pagination
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            data,
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Flat outcome for moderation endpoints
///
/// Moderation responses are always HTTP 200; the UI renders `message`
/// inline next to the control that triggered the action.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationOutcome {
    pub success: bool,
    pub message: String,
}

impl ModerationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes email and moderation state)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: String,
    pub is_banned: bool,
    pub is_muted: bool,
    pub warning_count: i32,
    pub created_at: DateTime<Utc>,
}

/// One warning on a user's record
#[derive(Debug, Clone, Serialize)]
pub struct WarningResponse {
    pub id: String,
    pub reason: String,
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
}

// ============================================================================
// Category Responses
// ============================================================================

/// Category response with bilingual fields
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub slug: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

// ============================================================================
// Thread / Post Responses
// ============================================================================

/// Thread summary for category listings
#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummaryResponse {
    pub id: String,
    pub title: String,
    pub author: Option<UserResponse>,
    pub category_id: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i64,
    pub reply_count: i64,
    pub last_post_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Full thread with one page of posts
#[derive(Debug, Serialize)]
pub struct ThreadDetailResponse {
    pub id: String,
    pub title: String,
    pub author: Option<UserResponse>,
    pub category_id: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub posts: PagedResponse<PostResponse>,
}

/// One post within a thread
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub thread_id: String,
    pub author: Option<UserResponse>,
    pub content: String,
    pub raw_content: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a like/unlike call
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub changed: bool,
    pub like_count: i64,
}

// ============================================================================
// Audit Responses
// ============================================================================

/// Display-safe projection of the acting user
#[derive(Debug, Clone, Serialize)]
pub struct AuditActorResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: String,
}

/// One audit entry, enriched for display
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    /// Best-effort label for the touched entity; "Unknown" when it has been
    /// deleted since
    pub entity_label: String,
    pub details: JsonValue,
    pub performed_by: Option<AuditActorResponse>,
    pub performed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

/// One page of the audit log
///
/// Unauthorized callers receive an empty page with `authorized: false`
/// instead of an error page.
#[derive(Debug, Serialize)]
pub struct AuditPageResponse {
    pub authorized: bool,
    pub entries: Vec<AuditEntryResponse>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl AuditPageResponse {
    pub fn unauthorized(page: i64, limit: i64) -> Self {
        Self {
            authorized: false,
            entries: Vec::new(),
            page,
            limit,
            total: 0,
            total_pages: 0,
        }
    }
}

// ============================================================================
// Settings Responses
// ============================================================================

/// One site setting
#[derive(Debug, Clone, Serialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: JsonValue,
    pub scope: String,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_response_total_pages() {
        let page = PagedResponse::<i32>::new(vec![], 1, 20, 41);
        assert_eq!(page.total_pages, 3);
        let exact = PagedResponse::<i32>::new(vec![], 1, 20, 40);
        assert_eq!(exact.total_pages, 2);
        let empty = PagedResponse::<i32>::new(vec![], 1, 20, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_moderation_outcome_shape() {
        let json = serde_json::to_value(ModerationOutcome::failed("User is not banned")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User is not banned");
    }
}
