//! File-based cache store.
//!
//! One JSON document per key at `<directory>/<key>.json`. Writes go to a
//! uniquely named temp file that is then renamed over the target, so a
//! reader sees either the old entry or the new one, never a torn write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::cache::{CacheEntry, CacheKey, CacheStore};
use crate::domain::DomainError;

const ENTRY_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileCacheStore {
    directory: PathBuf,
}

impl FileCacheStore {
    /// Creates a store rooted at `directory`; the directory is created on
    /// first write
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.directory
            .join(format!("{}.{}", key.as_str(), ENTRY_EXTENSION))
    }

    async fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>, DomainError> {
        match tokio::fs::read(path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::cache_unavailable(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Reads an entry along with the raw bytes it was decoded from.
    ///
    /// A corrupt file is removed and reported as absent.
    async fn read_entry(
        &self,
        path: &Path,
    ) -> Result<Option<(CacheEntry, Vec<u8>)>, DomainError> {
        let Some(data) = self.read_bytes(path).await? else {
            return Ok(None);
        };

        match serde_json::from_slice::<CacheEntry>(&data) {
            Ok(entry) => Ok(Some((entry, data))),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding corrupt cache entry");
                self.remove_if_unchanged(path, &data).await?;
                Ok(None)
            }
        }
    }

    /// Removes `path` only while it still holds `seen`.
    ///
    /// A writer may rename a fresh entry into place between our read and the
    /// removal; that entry must survive.
    async fn remove_if_unchanged(&self, path: &Path, seen: &[u8]) -> Result<bool, DomainError> {
        match self.read_bytes(path).await? {
            Some(current) if current == seen => self.remove_file(path).await,
            Some(_) => {
                debug!(path = %path.display(), "Cache entry replaced concurrently, keeping it");
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn remove_file(&self, path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::cache_unavailable(format!(
                "Failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    /// Expired entries read as misses; their files are left for
    /// `purge_expired`.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DomainError> {
        match self.read_entry(&self.entry_path(key)).await? {
            Some((entry, _)) if entry.is_expired() => {
                debug!(key = %key, "Cache entry expired");
                Ok(None)
            }
            Some((entry, _)) => Ok(Some(entry)),
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<CacheEntry, DomainError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                DomainError::cache_unavailable(format!(
                    "Failed to create cache directory '{}': {}",
                    self.directory.display(),
                    e
                ))
            })?;

        let entry = CacheEntry::new(key.clone(), value, ttl);
        let data = serde_json::to_vec_pretty(&entry).map_err(|e| {
            DomainError::cache_unavailable(format!("Failed to serialize cache entry: {}", e))
        })?;

        let path = self.entry_path(key);
        let temp_path = self
            .directory
            .join(format!(".{}.{}.tmp", key.as_str(), uuid::Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&temp_path, &data).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(DomainError::cache_unavailable(format!(
                "Failed to write '{}': {}",
                temp_path.display(),
                e
            )));
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(DomainError::cache_unavailable(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                path.display(),
                e
            )));
        }

        Ok(entry)
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, DomainError> {
        self.remove_file(&self.entry_path(key)).await
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let mut dir = match tokio::fs::read_dir(&self.directory).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(DomainError::cache_unavailable(format!(
                    "Failed to list '{}': {}",
                    self.directory.display(),
                    e
                )));
            }
        };

        let mut removed = 0;

        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| DomainError::cache_unavailable(e.to_string()))?
        {
            let path = item.path();
            let is_entry = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(CacheKey::parse)
                .is_some()
                && path.extension().and_then(|ext| ext.to_str()) == Some(ENTRY_EXTENSION);

            if !is_entry {
                continue;
            }

            // Corrupt entries are removed by read_entry and count as purged.
            let expired = match self.read_entry(&path).await? {
                Some((entry, data)) => {
                    entry.is_expired() && self.remove_if_unchanged(&path, &data).await?
                }
                None => true,
            };

            if expired {
                removed += 1;
            }
        }

        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
