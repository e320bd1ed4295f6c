//! LLM provider domain models and traits

mod config;
mod message;
mod provider;
mod request;
mod response;

pub use config::{
    ProviderConfig, DEFAULT_MAX_RETRIES, DEFAULT_MAX_TOKENS, DEFAULT_RETRY_DELAY,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
pub use message::{Message, MessageRole};
pub use provider::LlmProvider;
pub use request::{LlmRequest, LlmRequestBuilder};
pub use response::{LlmResponse, Usage};

#[cfg(test)]
pub use provider::mock::{MockLlmProvider, MockOutcome};
