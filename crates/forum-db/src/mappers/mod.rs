//! Entity ↔ model mappers
//!
//! `From<Model>` impls cover the infallible direction; rows whose stored
//! discriminators can be corrupt (audit entries, settings) go through
//! fallible mapper functions instead.

mod audit_log;
mod category;
mod post;
mod site_setting;
mod thread;
mod user;
mod warning;

pub use audit_log::audit_entry_from_model;
pub use site_setting::setting_from_model;
