//! Domain entities

mod audit_log;
mod category;
mod post;
mod site_setting;
mod thread;
mod user;
mod warning;

pub use audit_log::AuditLogEntry;
pub use category::Category;
pub use post::{Post, MAX_POST_LENGTH};
pub use site_setting::{SettingScope, SettingValue, SiteSetting};
pub use thread::Thread;
pub use user::{User, ANONYMIZED_USERNAME};
pub use warning::Warning;
