//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod audit;
pub mod auth;
pub mod category;
pub mod context;
pub mod error;
pub mod moderation;
pub mod permission;
pub mod post;
pub mod settings;
pub mod thread;
pub mod user;

// Re-export all services for convenience
pub use audit::AuditService;
pub use auth::AuthService;
pub use category::CategoryService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use moderation::ModerationService;
pub use permission::PermissionService;
pub use post::PostService;
pub use settings::SettingsService;
pub use thread::ThreadService;
pub use user::UserService;
