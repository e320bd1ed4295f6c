//! Generation results returned by the content pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the returned text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    Provider,
    Cache,
    Fallback,
}

impl fmt::Display for GenerationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Cache => write!(f, "cache"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of one generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub source: GenerationSource,
    /// Recovered provider failure that caused a fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn from_provider(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: GenerationSource::Provider,
            error: None,
        }
    }

    pub fn from_cache(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: GenerationSource::Cache,
            error: None,
        }
    }

    pub fn fallback(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: GenerationSource::Fallback,
            error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == GenerationSource::Fallback
    }
}
