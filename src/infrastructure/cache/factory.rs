//! Cache factory for runtime backend selection

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::cache::CacheStore;
use crate::domain::DomainError;

use super::file::FileCacheStore;
use super::in_memory::{InMemoryCacheStore, DEFAULT_MAX_CAPACITY};

pub const DEFAULT_CACHE_DIRECTORY: &str = "data/cache";

/// Supported cache backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// One JSON file per entry
    #[default]
    File,
    /// Process-local moka cache
    Memory,
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackend::File => write!(f, "file"),
            CacheBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "fs" => Ok(CacheBackend::File),
            "memory" | "in_memory" | "inmemory" => Ok(CacheBackend::Memory),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache backend: {}. Valid backends: file, memory",
                s
            ))),
        }
    }
}

/// Settings needed to build a cache store
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Entry directory (file backend)
    pub directory: PathBuf,
    /// Entry bound (memory backend)
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::File,
            directory: PathBuf::from(DEFAULT_CACHE_DIRECTORY),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn file(directory: impl Into<PathBuf>) -> Self {
        Self {
            backend: CacheBackend::File,
            directory: directory.into(),
            ..Default::default()
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: CacheBackend::Memory,
            ..Default::default()
        }
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// Builds the configured cache store
pub fn create_cache_store(config: &CacheConfig) -> Arc<dyn CacheStore> {
    match config.backend {
        CacheBackend::File => Arc::new(FileCacheStore::new(config.directory.clone())),
        CacheBackend::Memory => {
            Arc::new(InMemoryCacheStore::with_max_capacity(config.max_capacity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::{CacheKey, CacheKeyParams};
    use std::time::Duration;

    #[test]
    fn test_cache_backend_from_str() {
        assert_eq!("file".parse::<CacheBackend>().unwrap(), CacheBackend::File);
        assert_eq!("FILE".parse::<CacheBackend>().unwrap(), CacheBackend::File);
        assert_eq!("memory".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
        assert_eq!("in_memory".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
    }

    #[test]
    fn test_cache_backend_from_str_invalid() {
        let err = "redis".parse::<CacheBackend>().unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_cache_backend_display() {
        assert_eq!(CacheBackend::File.to_string(), "file");
        assert_eq!(CacheBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_default_config_is_file_backed() {
        let config = CacheConfig::default();
        assert_eq!(config.backend, CacheBackend::File);
        assert_eq!(config.directory, PathBuf::from(DEFAULT_CACHE_DIRECTORY));
    }

    #[tokio::test]
    async fn test_create_memory_store() {
        let store = create_cache_store(&CacheConfig::memory().with_max_capacity(10));
        assert_eq!(store.backend_name(), "memory");

        let key = CacheKey::from_params(&CacheKeyParams::new("prompt"));
        store.put(&key, "value", Duration::from_secs(60)).await.unwrap();
        assert!(store.get(&key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = create_cache_store(&CacheConfig::file(dir.path()));
        assert_eq!(store.backend_name(), "file");

        let key = CacheKey::from_params(&CacheKeyParams::new("prompt"));
        store.put(&key, "value", Duration::from_secs(60)).await.unwrap();
        assert!(dir.path().join(format!("{}.json", key)).exists());
    }
}
