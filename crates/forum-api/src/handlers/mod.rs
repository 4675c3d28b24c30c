//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod audit;
pub mod auth;
pub mod categories;
pub mod health;
pub mod moderation;
pub mod posts;
pub mod settings;
pub mod threads;
pub mod users;
