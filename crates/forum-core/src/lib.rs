//! # forum-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuditLogEntry, Category, Post, SiteSetting, SettingScope, SettingValue, Thread, User, Warning,
};
pub use error::DomainError;
pub use traits::{
    AuditLogFilter, AuditLogRepository, CategoryRepository, PostRepository, RepoResult,
    SettingRepository, ThreadRepository, UserRepository, WarningRepository,
};
pub use value_objects::{
    AuditAction, EntityRef, Language, LocalizedText, Role, RoleParseError, Snowflake,
    SnowflakeGenerator, SnowflakeParseError,
};
