//! Content generation pipeline
//!
//! Builds the prompt, checks the cache, calls the provider and falls back to
//! canned text when the provider cannot answer. Only an unknown template is
//! reported to the caller; every other failure is absorbed here.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::cache::{
    normalize_text, CacheKey, CacheKeyParams, CacheStore, PIPELINE_VERSION,
};
use crate::domain::{
    BuiltPrompt, DomainError, FallbackGenerator, GenerationResult, LlmProvider, LlmRequest,
    PromptCatalog, PromptContext, ProviderConfig,
};

/// Default lifetime of a cached generation
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Orchestrates prompt building, caching, provider calls and fallback
#[derive(Debug, Clone)]
pub struct GenerationService {
    provider: Arc<dyn LlmProvider>,
    cache: Arc<dyn CacheStore>,
    catalog: Arc<PromptCatalog>,
    fallback: FallbackGenerator,
    cache_ttl: Duration,
}

impl GenerationService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        cache: Arc<dyn CacheStore>,
        catalog: PromptCatalog,
    ) -> Self {
        Self {
            provider,
            cache,
            catalog: Arc::new(catalog),
            fallback: FallbackGenerator::new(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }

    /// Generates text for `template_id` from `context`.
    ///
    /// Returns `TemplateNotFound` for an unknown template; otherwise always
    /// produces a result, from the cache, the provider or the fallback.
    pub async fn generate(
        &self,
        context: &PromptContext,
        template_id: &str,
        provider: &ProviderConfig,
    ) -> Result<GenerationResult, DomainError> {
        let prompt = self.catalog.build(template_id, context)?;
        let key = Self::key_for(&prompt, provider);

        debug!(template = template_id, key = %key, "Prompt built, checking cache");

        match self.cache.get(&key).await {
            Ok(Some(entry)) => {
                info!(
                    template = template_id,
                    provider = %provider.name,
                    source = "cache",
                    "Generation complete"
                );
                return Ok(GenerationResult::from_cache(entry.value));
            }
            Ok(None) => debug!(key = %key, "Cache miss"),
            Err(e) => warn!(
                backend = self.cache.backend_name(),
                error = %e,
                "Cache read failed, treating as miss"
            ),
        }

        let request = LlmRequest::builder()
            .system(prompt.system.clone())
            .user(prompt.text.clone())
            .temperature(provider.temperature)
            .max_tokens(provider.max_tokens)
            .build();

        debug!(
            provider = %provider.name,
            wire = self.provider.provider_name(),
            model = %provider.model,
            "Calling provider"
        );

        match self.provider.chat(provider, request).await {
            Ok(response) => {
                debug!(
                    response_id = %response.id,
                    model = %response.model,
                    total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
                    "Provider responded"
                );

                let text = response.content().to_string();

                if let Err(e) = self.cache.put(&key, &text, self.cache_ttl).await {
                    warn!(
                        backend = self.cache.backend_name(),
                        error = %e,
                        "Cache write failed, returning provider result uncached"
                    );
                }

                info!(
                    template = template_id,
                    provider = %provider.name,
                    source = "provider",
                    "Generation complete"
                );
                Ok(GenerationResult::from_provider(text))
            }
            Err(e) => {
                if e.is_provider_error() {
                    warn!(
                        template = template_id,
                        provider = %provider.name,
                        wire = self.provider.provider_name(),
                        error = ?e,
                        "Provider failed, using fallback"
                    );
                } else {
                    error!(
                        template = template_id,
                        provider = %provider.name,
                        wire = self.provider.provider_name(),
                        error = ?e,
                        "Unexpected provider error, using fallback"
                    );
                }

                let text = self.fallback.generate(template_id, context);
                info!(
                    template = template_id,
                    provider = %provider.name,
                    source = "fallback",
                    "Generation complete"
                );
                Ok(GenerationResult::fallback(text, e.to_string()))
            }
        }
    }

    /// Returns the cache key `generate` would use for these inputs
    pub fn cache_key(
        &self,
        context: &PromptContext,
        template_id: &str,
        provider: &ProviderConfig,
    ) -> Result<CacheKey, DomainError> {
        let prompt = self.catalog.build(template_id, context)?;
        Ok(Self::key_for(&prompt, provider))
    }

    fn key_for(prompt: &BuiltPrompt, provider: &ProviderConfig) -> CacheKey {
        let params = CacheKeyParams::new(normalize_text(&prompt.text))
            .with_component("version", PIPELINE_VERSION)
            .with_component("system", normalize_text(&prompt.system))
            .with_component("provider", provider.name.as_str())
            .with_component("endpoint", provider.endpoint.as_str())
            .with_component("model", provider.model.as_str())
            .with_component("max_tokens", provider.max_tokens.to_string())
            .with_component("temperature", format!("{:.2}", provider.temperature));

        CacheKey::from_params(&params)
    }
}
