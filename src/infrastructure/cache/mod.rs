//! Cache infrastructure - Cache store implementations

mod factory;
mod file;
mod in_memory;

pub use factory::{create_cache_store, CacheBackend, CacheConfig, DEFAULT_CACHE_DIRECTORY};
pub use file::FileCacheStore;
pub use in_memory::{InMemoryCacheStore, DEFAULT_MAX_CAPACITY};
