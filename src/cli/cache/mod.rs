//! Cache maintenance commands

use clap::Subcommand;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::cache::{create_cache_store, CacheBackend};

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Delete every expired cache entry
    Purge,
}

pub async fn run(config: &AppConfig, command: CacheCommand) -> anyhow::Result<()> {
    match command {
        CacheCommand::Purge => {
            let removed = purge(config).await?;
            println!("Removed {} expired entries", removed);
        }
    }

    Ok(())
}

/// Purges the configured store.
///
/// The memory backend lives inside the server process, so a separate CLI
/// process has nothing to purge there.
async fn purge(config: &AppConfig) -> anyhow::Result<usize> {
    let cache_config = config.cache_config()?;

    if cache_config.backend == CacheBackend::Memory {
        anyhow::bail!("cache purge needs a persistent backend; memory entries live in the server");
    }

    let store = create_cache_store(&cache_config);
    let removed = store.purge_expired().await?;

    info!(backend = store.backend_name(), removed, "Cache purged");
    Ok(removed)
}
