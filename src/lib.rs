//! Lorekeeper
//!
//! Generates descriptions of characters, enemies, locations and potions for
//! tabletop role-playing sessions. A request flows through prompt building,
//! a TTL cache, an OpenAI-compatible provider with retry, and a canned
//! fallback when the provider cannot answer.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{DomainError, UserRepository};
use infrastructure::{
    cache::create_cache_store,
    llm::{ChatCompletionsProvider, HttpClient},
    services::GenerationService,
    user::{Argon2Hasher, InMemoryUserRepository, JsonFileUserRepository, UserService},
};

/// Builds the generation pipeline from configuration
pub fn create_generation_service(config: &AppConfig) -> Result<GenerationService, DomainError> {
    let cache = create_cache_store(&config.cache_config()?);
    let provider = Arc::new(ChatCompletionsProvider::new(HttpClient::new()));

    info!(
        cache = cache.backend_name(),
        ttl_secs = config.cache.ttl_secs,
        "Generation service ready"
    );

    Ok(GenerationService::new(provider, cache, config.prompt_catalog())
        .with_cache_ttl(config.cache_ttl()))
}

/// Opens the configured user store
pub async fn create_user_service(config: &AppConfig) -> Result<UserService, DomainError> {
    let backend = config.users.backend.trim().to_lowercase();
    let repository: Arc<dyn UserRepository> = match backend.as_str() {
        "file" => Arc::new(JsonFileUserRepository::open(&config.users.path).await?),
        "memory" | "in_memory" => Arc::new(InMemoryUserRepository::new()),
        other => {
            return Err(DomainError::configuration(format!(
                "Unknown user store backend: {}. Valid backends: file, memory",
                other
            )));
        }
    };

    Ok(UserService::new(repository, Arc::new(Argon2Hasher::new())))
}

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let generation = create_generation_service(config)?;
    let providers = config.provider_registry()?;
    let users = create_user_service(config).await?;

    info!(
        providers = ?providers.names(),
        default_provider = providers.default_provider(),
        "Application state initialized"
    );

    Ok(AppState::new(generation, providers, users))
}
