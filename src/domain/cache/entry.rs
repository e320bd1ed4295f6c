use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::key::CacheKey;

/// A cached generation, owned by the cache store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(key: CacheKey, value: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key,
            value: value.into(),
            created_at: Utc::now(),
            ttl,
        }
    }

    /// An entry is live while `now - created_at < ttl`.
    ///
    /// A `created_at` in the future (clock moved backwards) counts as zero
    /// elapsed time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = (now - self.created_at).to_std().unwrap_or(Duration::ZERO);
        elapsed >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
