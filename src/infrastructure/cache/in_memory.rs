//! In-memory cache store using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{CacheEntry, CacheKey, CacheStore};
use crate::domain::DomainError;

/// Default maximum number of entries
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Thread-safe in-memory cache store.
///
/// Entries carry their own TTL; moka only bounds capacity. Expiry is checked
/// lazily on read.
#[derive(Debug, Clone)]
pub struct InMemoryCacheStore {
    cache: MokaCache<CacheKey, CacheEntry>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::with_max_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_max_capacity(max_capacity: u64) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(max_capacity).build(),
        }
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
        match self.cache.get(key).await {
            Some(entry) if entry.is_expired() => {
                self.cache.invalidate(key).await;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn put(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<CacheEntry, DomainError> {
        let entry = CacheEntry::new(key.clone(), value, ttl);
        self.cache.insert(key.clone(), entry.clone()).await;
        Ok(entry)
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, DomainError> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let expired: Vec<CacheKey> = self
            .cache
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in &expired {
            self.cache.invalidate(key).await;
        }

        Ok(expired.len())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
