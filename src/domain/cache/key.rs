//! Cache key derivation

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version of the generation pipeline. Bumping it invalidates every
/// previously cached response.
pub const PIPELINE_VERSION: &str = "v1";

/// Hex-encoded SHA-256 key identifying one logical generation request
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Hashes the canonical encoding of the given parameters
    pub fn from_params(params: &CacheKeyParams) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(params.canonical().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wraps an existing key, accepting only 64 lowercase hex characters
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == 64
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));

        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters for cache key generation
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    /// Primary identifier (the normalized prompt text)
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters with a primary identifier
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }

    /// Length-prefixed encoding so no component value can collide with
    /// another component's boundary
    fn canonical(&self) -> String {
        let mut out = format!("{}:{}", self.primary.len(), self.primary);

        for (k, v) in &self.components {
            out.push_str(&format!("|{}:{}={}:{}", k.len(), k, v.len(), v));
        }

        out
    }
}

/// Trims and collapses whitespace runs to a single space
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
