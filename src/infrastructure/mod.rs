//! Infrastructure layer - Storage backends, provider clients and services

pub mod cache;
pub mod llm;
pub mod logging;
pub mod services;
pub mod user;
