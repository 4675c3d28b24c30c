//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{AuditLogEntry, Category, Post, SiteSetting, Thread, User, Warning};
use crate::error::DomainError;
use crate::value_objects::{AuditAction, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID (anonymized accounts included)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by Discord ID
    async fn find_by_discord_id(&self, discord_id: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update an existing user (moderation status, role, profile)
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Anonymize an account in place for self-requested deletion
    async fn anonymize(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Warning Repository
// ============================================================================

#[async_trait]
pub trait WarningRepository: Send + Sync {
    /// Append a warning to a user's record
    async fn create(&self, warning: &Warning) -> RepoResult<()>;

    /// All warnings for a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Warning>>;

    /// Number of warnings on record for a user
    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Thread Repository
// ============================================================================

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Find thread by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Thread>>;

    /// Threads in a category: pinned first, then most recent activity
    async fn find_by_category(
        &self,
        category_id: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Thread>>;

    /// Total thread count in a category
    async fn count_by_category(&self, category_id: Snowflake) -> RepoResult<i64>;

    /// Create a thread together with its first post in one transaction
    async fn create_with_first_post(&self, thread: &Thread, first_post: &Post) -> RepoResult<()>;

    /// Update an existing thread (pin/lock flags, last_post_at)
    async fn update(&self, thread: &Thread) -> RepoResult<()>;

    /// Delete a thread and all of its posts in one transaction
    ///
    /// Returns the number of posts removed.
    async fn delete_cascade(&self, id: Snowflake) -> RepoResult<u64>;

    /// Record a view for the given user
    ///
    /// Returns true when this was the user's first view (the view counter is
    /// only incremented then).
    async fn record_view(&self, thread_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Posts in a thread, oldest first
    async fn find_by_thread(
        &self,
        thread_id: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Post>>;

    /// Total post count in a thread
    async fn count_by_thread(&self, thread_id: Snowflake) -> RepoResult<i64>;

    /// The id of the chronologically first post of a thread
    ///
    /// Ties on created_at are broken by the smaller id.
    async fn first_post_id(&self, thread_id: Snowflake) -> RepoResult<Option<Snowflake>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update an existing post
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Add a like; returns false when the user already liked the post
    async fn add_like(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Remove a like; returns false when there was none
    async fn remove_like(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Number of likes on a post
    async fn like_count(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Category>>;

    /// Find category by slug
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>>;

    /// All categories ordered by position
    async fn list(&self) -> RepoResult<Vec<Category>>;

    /// Check if a slug is already taken
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool>;

    /// Create a new category
    async fn create(&self, category: &Category) -> RepoResult<()>;

    /// Update an existing category
    async fn update(&self, category: &Category) -> RepoResult<()>;

    /// Delete a category
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Rewrite all display positions in one transaction
    async fn reorder(&self, positions: &[(Snowflake, i32)]) -> RepoResult<()>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Filter for audit log queries; all fields are conjunctive
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<Snowflake>,
    pub action: Option<AuditAction>,
    pub performed_by: Option<Snowflake>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one immutable entry
    ///
    /// This is deliberately the only write operation: audit records are never
    /// updated or deleted.
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()>;

    /// Matching entries sorted by performed_at descending
    async fn search(
        &self,
        filter: &AuditLogFilter,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<AuditLogEntry>>;

    /// Total number of matching entries
    async fn count(&self, filter: &AuditLogFilter) -> RepoResult<i64>;
}

// ============================================================================
// Setting Repository
// ============================================================================

#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// Find a setting by key
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<SiteSetting>>;

    /// All settings, optionally filtered by scope
    async fn list(&self, scope: Option<&str>) -> RepoResult<Vec<SiteSetting>>;

    /// Insert or replace a setting
    async fn upsert(&self, setting: &SiteSetting) -> RepoResult<()>;

    /// Delete a setting; returns false when the key did not exist
    async fn delete(&self, key: &str) -> RepoResult<bool>;
}
