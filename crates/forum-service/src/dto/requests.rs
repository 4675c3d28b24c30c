//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying user input also
//! implement `Validate`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use forum_core::value_objects::LocalizedText;

// ============================================================================
// Auth Requests
// ============================================================================

/// Verified Discord identity handed over by the authentication collaborator
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiscordLoginRequest {
    #[validate(length(min = 1, max = 32, message = "Discord ID must be 1-32 characters"))]
    pub discord_id: String,

    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Avatar hash
    pub avatar: Option<String>,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// Thread / Post Requests
// ============================================================================

/// Create thread request; the content becomes the thread's first post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThreadRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    /// Category ID (Snowflake as string)
    pub category_id: String,

    #[validate(length(min = 1, max = 20000, message = "Post content too long"))]
    pub content: String,
}

/// Reply to a thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 20000, message = "Post content too long"))]
    pub content: String,
}

/// Edit an existing post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 20000, message = "Post content too long"))]
    pub content: String,
}

// ============================================================================
// Category Requests
// ============================================================================

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    pub name: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[validate(length(min = 1, max = 64, message = "Slug must be 1-64 characters"))]
    pub slug: String,

    #[serde(default)]
    pub position: i32,

    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Update category request; absent fields keep their value
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,

    #[validate(length(min = 1, max = 64, message = "Slug must be 1-64 characters"))]
    pub slug: Option<String>,

    pub position: Option<i32>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Reorder categories: the complete new position assignment
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderCategoriesRequest {
    pub positions: Vec<CategoryPosition>,
}

/// One category's new display position
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPosition {
    /// Category ID (Snowflake as string)
    pub id: String,
    pub position: i32,
}

// ============================================================================
// Moderation Requests
// ============================================================================

/// Pin or lock flag change
#[derive(Debug, Clone, Deserialize)]
pub struct SetFlagRequest {
    pub value: bool,
}

/// Ban a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BanUserRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,

    /// Ban duration in seconds; absent means permanent
    pub duration_secs: Option<i64>,
}

/// Mute a user; duration is mandatory
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MuteUserRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,

    /// Mute duration in seconds
    pub duration_secs: i64,
}

/// Warn a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WarnUserRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

/// Change a user's role
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role: "user", "moderator" or "admin"
    pub role: String,
}

// ============================================================================
// Audit Requests
// ============================================================================

/// Audit log query; all filters are conjunctive
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogQuery {
    /// Entity discriminator: "user", "thread", "post" or "category"
    pub entity_type: Option<String>,
    /// Entity ID (Snowflake as string)
    pub entity_id: Option<String>,
    /// Action identifier, e.g. "user_banned"
    pub action: Option<String>,
    /// Acting user ID (Snowflake as string)
    pub performed_by: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// ============================================================================
// Settings Requests
// ============================================================================

/// Insert or replace a site setting
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSettingRequest {
    #[validate(length(min = 1, max = 128, message = "Key must be 1-128 characters"))]
    pub key: String,

    /// Plain string or `{en, de}` object
    pub value: serde_json::Value,

    /// Visibility scope: "public" (default) or "admin"
    #[serde(default)]
    pub scope: Option<String>,
}
