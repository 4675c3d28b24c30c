//! # forum-cache
//!
//! Redis caching layer for session storage and rendered-page invalidation.
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Refresh token tracking per user
//! - **Page Invalidation**: "mark this route stale" signal consumed by the
//!   rendering layer

pub mod pages;
pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};

// Re-export page invalidation types
pub use pages::PageCacheStore;
