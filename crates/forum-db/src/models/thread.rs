//! Thread database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for threads table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadModel {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub category_id: i64,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i64,
    pub last_post_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
