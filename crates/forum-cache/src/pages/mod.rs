//! Rendered-page cache invalidation.

mod invalidation;

pub use invalidation::PageCacheStore;
