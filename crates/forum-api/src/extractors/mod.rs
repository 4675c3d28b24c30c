//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{CategoryIdPath, PostIdPath, SettingKeyPath, SlugPath, ThreadIdPath, UserIdPath};
pub use validated::{OptionalValidatedJson, ValidatedJson};
