//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, GenerationSettings, LogFormat, LoggingConfig, ProviderSettings,
    ServerConfig, UserStoreSettings,
};
