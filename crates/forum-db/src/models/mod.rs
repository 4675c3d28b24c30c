//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_log;
mod category;
mod post;
mod site_setting;
mod thread;
mod user;
mod warning;

pub use audit_log::AuditLogModel;
pub use category::CategoryModel;
pub use post::PostModel;
pub use site_setting::SiteSettingModel;
pub use thread::ThreadModel;
pub use user::UserModel;
pub use warning::WarningModel;
