//! Named provider configurations

use std::collections::BTreeMap;

use crate::domain::{DomainError, ProviderConfig};

/// Read-only set of configured providers with a default.
///
/// Built once at startup; callers pick a provider by name or fall back to
/// the default.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderConfig>,
    default_provider: String,
}

impl ProviderRegistry {
    /// Builds a registry, failing if `default_provider` is not among `providers`
    pub fn new(
        providers: impl IntoIterator<Item = ProviderConfig>,
        default_provider: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let providers: BTreeMap<String, ProviderConfig> = providers
            .into_iter()
            .map(|config| (config.name.clone(), config))
            .collect();
        let default_provider = default_provider.into();

        if !providers.contains_key(&default_provider) {
            return Err(DomainError::configuration(format!(
                "Default provider '{}' is not configured",
                default_provider
            )));
        }

        Ok(Self {
            providers,
            default_provider,
        })
    }

    /// Looks up a provider by name, or the default when `name` is `None`
    pub fn resolve(&self, name: Option<&str>) -> Result<&ProviderConfig, DomainError> {
        let name = name.unwrap_or(&self.default_provider);

        self.providers
            .get(name)
            .ok_or_else(|| DomainError::not_found(format!("Provider '{}' not found", name)))
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}
