//! # forum-service
//!
//! Application layer: business logic, permission gate, moderation workflow,
//! audit trail and request/response DTOs.
//!
//! Services receive their dependencies through [`ServiceContext`] and return
//! [`ServiceResult`] values; the HTTP layer decides how each error surfaces.

pub mod dto;
pub mod services;

pub use services::{
    AuditService, AuthService, CategoryService, ModerationService, PermissionService, PostService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SettingsService,
    ThreadService, UserService,
};
