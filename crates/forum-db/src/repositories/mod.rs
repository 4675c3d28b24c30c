//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.
//! Each repository handles database operations for a specific domain entity.

mod audit_log;
mod category;
mod error;
mod post;
mod setting;
mod thread;
mod user;
mod warning;

pub use audit_log::PgAuditLogRepository;
pub use category::PgCategoryRepository;
pub use post::PgPostRepository;
pub use setting::PgSettingRepository;
pub use thread::PgThreadRepository;
pub use user::PgUserRepository;
pub use warning::PgWarningRepository;
