//! Cache domain - keys, entries and the store abstraction

mod entry;
mod key;
mod repository;

pub use entry::CacheEntry;
pub use key::{normalize_text, CacheKey, CacheKeyParams, PIPELINE_VERSION};
pub use repository::CacheStore;

#[cfg(test)]
pub use repository::mock::MockCacheStore;
