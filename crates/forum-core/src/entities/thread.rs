//! Thread entity - a discussion topic
//!
//! A thread carries no canonical content of its own; its first post is the
//! content holder.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Discussion thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: Snowflake,
    pub title: String,
    pub author_id: Snowflake,
    pub category_id: Snowflake,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i64,
    pub last_post_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// Create a new Thread
    pub fn new(id: Snowflake, title: String, author_id: Snowflake, category_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            author_id,
            category_id,
            is_pinned: false,
            is_locked: false,
            views: 0,
            last_post_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the pinned flag; setting the current state again is allowed
    pub fn set_pinned(&mut self, pinned: bool) {
        self.is_pinned = pinned;
        self.updated_at = Utc::now();
    }

    /// Set the locked flag; setting the current state again is allowed
    pub fn set_locked(&mut self, locked: bool) {
        self.is_locked = locked;
        self.updated_at = Utc::now();
    }

    /// Record a new reply timestamp
    pub fn touch_last_post(&mut self) {
        let now = Utc::now();
        self.last_post_at = now;
        self.updated_at = now;
    }
}
