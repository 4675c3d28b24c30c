//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Discord login request (the OAuth exchange happens upstream)
#[derive(Debug, Serialize)]
pub struct DiscordLoginRequest {
    pub discord_id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl DiscordLoginRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            discord_id: format!("90000000000000{suffix}"),
            username: format!("testuser{suffix}"),
            email: Some(format!("test{suffix}@example.com")),
            avatar: None,
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub is_banned: bool,
    pub is_muted: bool,
    pub warning_count: i32,
}

/// Public user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Bilingual text payload
#[derive(Debug, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub de: String,
}

/// Create category request
#[derive(Debug, Serialize)]
pub struct CreateCategoryRequest {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub slug: String,
    pub position: i32,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CreateCategoryRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: LocalizedText {
                en: format!("Test Category {suffix}"),
                de: format!("Testkategorie {suffix}"),
            },
            description: LocalizedText {
                en: "A test category".to_string(),
                de: "Eine Testkategorie".to_string(),
            },
            slug: format!("test-category-{suffix}"),
            position: 0,
            color: None,
            icon: None,
        }
    }
}

/// Category response
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: LocalizedText,
    pub slug: String,
    pub position: i32,
}

/// Create thread request
#[derive(Debug, Serialize)]
pub struct CreateThreadRequest {
    pub title: String,
    pub category_id: String,
    pub content: String,
}

impl CreateThreadRequest {
    pub fn unique(category_id: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Thread {suffix}"),
            category_id: category_id.to_string(),
            content: format!("First post of thread {suffix}"),
        }
    }
}

/// Reply request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// Thread detail response
#[derive(Debug, Deserialize)]
pub struct ThreadDetailResponse {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub posts: PagedResponse<PostResponse>,
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub thread_id: String,
    pub content: String,
    pub like_count: i64,
}

/// Paged listing wrapper
#[derive(Debug, Deserialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Like toggle response
#[derive(Debug, Deserialize)]
pub struct LikeResponse {
    pub changed: bool,
    pub like_count: i64,
}

/// Flat moderation outcome
#[derive(Debug, Deserialize)]
pub struct ModerationOutcome {
    pub success: bool,
    pub message: String,
}

/// Pin/lock flag request
#[derive(Debug, Serialize)]
pub struct SetFlagRequest {
    pub value: bool,
}

/// Audit log page
#[derive(Debug, Deserialize)]
pub struct AuditPageResponse {
    pub authorized: bool,
    pub entries: Vec<serde_json::Value>,
    pub page: i64,
    pub total: i64,
}

/// Setting response
#[derive(Debug, Deserialize)]
pub struct SettingResponse {
    pub key: String,
    pub value: serde_json::Value,
    pub scope: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
