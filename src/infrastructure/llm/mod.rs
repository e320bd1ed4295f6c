//! LLM provider implementations

mod chat_completions;
mod http_client;
mod registry;

pub use chat_completions::ChatCompletionsProvider;
pub use http_client::{HttpClient, HttpClientTrait, HttpError, HttpResponse};
pub use registry::ProviderRegistry;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
