use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse, ProviderConfig};
use crate::domain::DomainError;

/// Trait for text-generation providers.
///
/// Implementations receive the provider settings with every call so one
/// client can serve any number of configured endpoints. Failures come back
/// as provider-classified `DomainError`s and never panic.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(
        &self,
        config: &ProviderConfig,
        request: LlmRequest,
    ) -> Result<LlmResponse, DomainError>;

    /// Wire protocol name, used in logs
    fn provider_name(&self) -> &'static str;
}
