//! Value objects - immutable domain primitives

mod audit;
mod localized;
mod role;
mod snowflake;

pub use audit::{AuditAction, EntityRef};
pub use localized::{Language, LocalizedText};
pub use role::{Role, RoleParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
