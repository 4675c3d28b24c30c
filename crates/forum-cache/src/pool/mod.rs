//! Redis connection pooling

mod redis_pool;

use std::sync::Arc;

pub use redis_pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

/// Shared Redis pool handle
pub type SharedRedisPool = Arc<RedisPool>;
