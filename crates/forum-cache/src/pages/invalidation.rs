//! Rendered-page invalidation signals.
//!
//! The rendering layer caches fully rendered pages keyed by route. When a
//! write changes what a page would show, the service layer marks the affected
//! routes stale here. The renderer checks the stale flag before serving a
//! cached page and re-renders when the flag is set.

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for stale-page markers
const STALE_PAGE_PREFIX: &str = "stale_page:";

/// Default TTL for stale markers (1 hour)
///
/// A marker that outlives the cached page it refers to is harmless, so the
/// TTL only bounds memory usage.
const DEFAULT_STALE_TTL: u64 = 60 * 60;

/// Store for page staleness markers
#[derive(Debug, Clone)]
pub struct PageCacheStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl PageCacheStore {
    /// Create a new page cache store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_STALE_TTL,
        }
    }

    /// Create with custom marker TTL
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(route: &str) -> String {
        format!("{STALE_PAGE_PREFIX}{route}")
    }

    /// Mark a route's cached page as stale
    pub async fn mark_stale(&self, route: &str) -> RedisResult<()> {
        let key = Self::key(route);
        self.pool.set(&key, &true, Some(self.ttl_seconds)).await?;
        tracing::debug!(route = %route, "Marked page stale");
        Ok(())
    }

    /// Mark several routes stale in one call
    pub async fn mark_stale_many(&self, routes: &[&str]) -> RedisResult<()> {
        for route in routes {
            self.mark_stale(route).await?;
        }
        Ok(())
    }

    /// Check whether a route has been marked stale
    pub async fn is_stale(&self, route: &str) -> RedisResult<bool> {
        self.pool.exists(&Self::key(route)).await
    }

    /// Clear the stale marker after a page has been re-rendered
    pub async fn clear(&self, route: &str) -> RedisResult<bool> {
        self.pool.delete(&Self::key(route)).await
    }
}
