//! Domain layer - Core types, traits and pure logic

pub mod cache;
pub mod error;
pub mod fallback;
pub mod generation;
pub mod llm;
pub mod prompt;
pub mod user;

pub use cache::{CacheEntry, CacheKey, CacheKeyParams, CacheStore};
pub use error::DomainError;
pub use fallback::FallbackGenerator;
pub use generation::{GenerationResult, GenerationSource};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, ProviderConfig, Usage};
pub use prompt::{BuiltPrompt, ContextValue, PromptCatalog, PromptContext, PromptTemplate};
pub use user::{User, UserId, UserRepository};
