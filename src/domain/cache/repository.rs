//! Cache store trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use super::entry::CacheEntry;
use super::key::CacheKey;
use crate::domain::DomainError;

/// Key/value store for generated text with per-entry TTL.
///
/// Expired entries are never returned: `get` treats them as absent and may
/// evict them on the spot. Writers to the same key race and the last one
/// wins; a single `put` replaces an entry atomically.
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Gets a live entry
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError>;

    /// Stores a value, replacing any previous entry for the key
    async fn put(&self, key: &CacheKey, value: &str, ttl: Duration)
        -> Result<CacheEntry, DomainError>;

    /// Deletes an entry, returning whether one existed
    async fn delete(&self, key: &CacheKey) -> Result<bool, DomainError>;

    /// Removes every expired entry, returning how many were removed
    async fn purge_expired(&self) -> Result<usize, DomainError>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache store for testing
    #[derive(Debug, Default)]
    pub struct MockCacheStore {
        entries: Mutex<HashMap<CacheKey, CacheEntry>>,
        error: Mutex<Option<String>>,
    }

    impl MockCacheStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry(self, entry: CacheEntry) -> Self {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.key.clone(), entry);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::cache_unavailable(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CacheStore for MockCacheStore {
        async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
            self.check_error()?;
            let mut entries = self.entries.lock().unwrap();

            match entries.get(key) {
                Some(entry) if entry.is_expired() => {
                    entries.remove(key);
                    Ok(None)
                }
                Some(entry) => Ok(Some(entry.clone())),
                None => Ok(None),
            }
        }

        async fn put(
            &self,
            key: &CacheKey,
            value: &str,
            ttl: Duration,
        ) -> Result<CacheEntry, DomainError> {
            self.check_error()?;
            let entry = CacheEntry::new(key.clone(), value, ttl);
            self.entries
                .lock()
                .unwrap()
                .insert(key.clone(), entry.clone());
            Ok(entry)
        }

        async fn delete(&self, key: &CacheKey) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn purge_expired(&self) -> Result<usize, DomainError> {
            self.check_error()?;
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired());
            Ok(before - entries.len())
        }

        fn backend_name(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::cache::CacheKeyParams;

        fn key(name: &str) -> CacheKey {
            CacheKey::from_params(&CacheKeyParams::new(name))
        }

        #[tokio::test]
        async fn test_mock_cache_put_get() {
            let cache = MockCacheStore::new();
            cache
                .put(&key("a"), "value", Duration::from_secs(60))
                .await
                .unwrap();

            let entry = cache.get(&key("a")).await.unwrap().unwrap();
            assert_eq!(entry.value, "value");
        }

        #[tokio::test]
        async fn test_mock_cache_expired_entry_is_absent() {
            let cache = MockCacheStore::new();
            cache.put(&key("a"), "value", Duration::ZERO).await.unwrap();

            assert!(cache.get(&key("a")).await.unwrap().is_none());
            assert_eq!(cache.len(), 0);
        }

        #[tokio::test]
        async fn test_mock_cache_with_error() {
            let cache = MockCacheStore::new().with_error("disk full");

            let result = cache.get(&key("a")).await;
            assert!(matches!(result, Err(DomainError::CacheUnavailable { .. })));
        }
    }
}
