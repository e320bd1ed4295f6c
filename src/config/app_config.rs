use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::domain::llm::{
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_TOKENS, DEFAULT_RETRY_DELAY, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT,
};
use crate::domain::{DomainError, PromptCatalog, ProviderConfig};
use crate::infrastructure::cache::{CacheConfig, DEFAULT_CACHE_DIRECTORY, DEFAULT_MAX_CAPACITY};
use crate::infrastructure::llm::ProviderRegistry;
use crate::infrastructure::services::DEFAULT_CACHE_TTL;

const ENV_PREFIX: &str = "LOREKEEPER";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub generation: GenerationSettings,
    pub providers: BTreeMap<String, ProviderSettings>,
    pub users: UserStoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// `file` or `memory`
    pub backend: String,
    pub directory: PathBuf,
    pub ttl_secs: u64,
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Provider used when a request names none; the first configured
    /// provider when unset
    pub default_provider: Option<String>,
    /// Extra or overriding templates, id to template text
    pub templates: BTreeMap<String, String>,
}

/// One `[providers.<name>]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserStoreSettings {
    /// `file` or `memory`
    pub backend: String,
    pub path: PathBuf,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY.as_millis() as u64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            directory: PathBuf::from(DEFAULT_CACHE_DIRECTORY),
            ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl Default for UserStoreSettings {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            path: PathBuf::from("data/users.json"),
        }
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local` and `LOREKEEPER__*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(None)
    }

    /// Like [`AppConfig::load`], with an extra file layered above the local one
    pub fn load_with(extra: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    pub fn cache_config(&self) -> Result<CacheConfig, DomainError> {
        Ok(CacheConfig {
            backend: self.cache.backend.parse()?,
            directory: self.cache.directory.clone(),
            max_capacity: self.cache.max_capacity,
        })
    }

    /// Built-in templates plus the configured ones
    pub fn prompt_catalog(&self) -> PromptCatalog {
        self.generation
            .templates
            .iter()
            .fold(PromptCatalog::builtin(), |catalog, (id, body)| {
                catalog.with_template(id.clone(), body.clone())
            })
    }

    pub fn provider_registry(&self) -> Result<ProviderRegistry, DomainError> {
        if self.providers.is_empty() {
            return Err(DomainError::configuration("No providers configured"));
        }

        let providers = self
            .providers
            .iter()
            .map(|(name, settings)| settings.to_provider_config(name))
            .collect::<Result<Vec<_>, _>>()?;

        let default_provider = match &self.generation.default_provider {
            Some(name) => name.clone(),
            None => providers[0].name.clone(),
        };

        ProviderRegistry::new(providers, default_provider)
    }
}

impl ProviderSettings {
    pub fn to_provider_config(&self, name: &str) -> Result<ProviderConfig, DomainError> {
        if self.endpoint.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "Provider '{}' has no endpoint",
                name
            )));
        }

        let api_key = self.resolve_api_key(name);

        Ok(
            ProviderConfig::new(name, self.endpoint.trim(), api_key, &self.model)
                .with_timeout(Duration::from_secs(self.timeout_secs))
                .with_max_tokens(self.max_tokens)
                .with_temperature(self.temperature)
                .with_max_retries(self.max_retries)
                .with_retry_delay(Duration::from_millis(self.retry_delay_ms)),
        )
    }

    fn resolve_api_key(&self, name: &str) -> String {
        if let Some(key) = &self.api_key {
            return key.clone();
        }

        let Some(var) = &self.api_key_env else {
            return String::new();
        };

        std::env::var(var).unwrap_or_else(|_| {
            warn!(provider = name, variable = %var, "API key variable is not set");
            String::new()
        })
    }
}
