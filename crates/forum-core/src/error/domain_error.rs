//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Thread not found: {0}")]
    ThreadNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Category not found: {0}")]
    CategoryNotFound(Snowflake),

    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Invalid duration: must be a positive number of seconds")]
    InvalidDuration,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slug already in use: {0}")]
    SlugAlreadyExists(String),

    #[error("Setting key already exists: {0}")]
    SettingKeyExists(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Thread is locked")]
    ThreadLocked,

    #[error("The first post of a thread cannot be deleted; delete the thread instead")]
    FirstPostUndeletable,

    #[error("User is banned")]
    UserBanned,

    #[error("User is muted")]
    UserMuted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ThreadNotFound(_) => "UNKNOWN_THREAD",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::SettingNotFound(_) => "UNKNOWN_SETTING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidSlug(_) => "INVALID_SLUG",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Conflict
            Self::SlugAlreadyExists(_) => "SLUG_ALREADY_EXISTS",
            Self::SettingKeyExists(_) => "SETTING_KEY_EXISTS",

            // Business Rules
            Self::ThreadLocked => "THREAD_LOCKED",
            Self::FirstPostUndeletable => "FIRST_POST_UNDELETABLE",
            Self::UserBanned => "USER_BANNED",
            Self::UserMuted => "USER_MUTED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ThreadNotFound(_)
                | Self::PostNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::SettingNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidSlug(_)
                | Self::InvalidDuration
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlugAlreadyExists(_) | Self::SettingKeyExists(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::FirstPostUndeletable;
        assert_eq!(err.code(), "FIRST_POST_UNDELETABLE");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ThreadNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::SettingNotFound("brand".to_string()).is_not_found());
        assert!(!DomainError::ThreadLocked.is_not_found());
    }

    #[test]
    fn test_first_post_message_directs_to_thread_deletion() {
        let msg = DomainError::FirstPostUndeletable.to_string();
        assert!(msg.contains("delete the thread instead"));
    }
}
