//! OpenAI-compatible chat completions client with timeout and retry

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::http_client::{HttpClientTrait, HttpError, HttpResponse};
use crate::domain::{
    DomainError, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, ProviderConfig,
    Usage,
};

/// Longest slice of an error body kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Provider speaking the `/v1/chat/completions` wire format.
///
/// Each attempt is bounded by `config.timeout`. Transient failures
/// (timeouts, transport errors, HTTP 5xx) are retried up to
/// `config.max_retries` times with a fixed `config.retry_delay` in between.
#[derive(Debug)]
pub struct ChatCompletionsProvider<C: HttpClientTrait> {
    client: C,
}

impl<C: HttpClientTrait> ChatCompletionsProvider<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn build_request(&self, config: &ProviderConfig, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<ChatMessage> = request
            .messages
            .iter()
            .map(ChatMessage::from_domain)
            .collect();

        serde_json::json!({
            "model": config.model,
            "messages": messages,
            "max_tokens": request.max_tokens.unwrap_or(config.max_tokens),
            "temperature": request.temperature.unwrap_or(config.temperature),
        })
    }

    async fn attempt(
        &self,
        config: &ProviderConfig,
        body: &serde_json::Value,
    ) -> Result<LlmResponse, DomainError> {
        let auth_header = format!("Bearer {}", config.api_key);
        let headers = vec![
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self
            .client
            .post_json(&config.endpoint, headers, body, config.timeout)
            .await
            .map_err(|e| match e {
                HttpError::Timeout => DomainError::provider_timeout(&config.name, config.timeout),
                HttpError::Transport(message) => {
                    DomainError::provider_unavailable(&config.name, message)
                }
            })?;

        parse_response(config, response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for ChatCompletionsProvider<C> {
    async fn chat(
        &self,
        config: &ProviderConfig,
        request: LlmRequest,
    ) -> Result<LlmResponse, DomainError> {
        let body = self.build_request(config, &request);
        let max_attempts = config.max_attempts();
        let mut attempt = 1;

        loop {
            debug!(provider = %config.name, attempt, max_attempts, "Calling provider");

            match self.attempt(config, &body).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    warn!(
                        provider = %config.name,
                        attempt,
                        error = ?e,
                        "Transient provider failure, retrying"
                    );
                    tokio::time::sleep(config.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "chat_completions"
    }
}

fn parse_response(
    config: &ProviderConfig,
    response: HttpResponse,
) -> Result<LlmResponse, DomainError> {
    if !response.is_success() {
        return Err(DomainError::provider_http(
            &config.name,
            response.status,
            truncate(&response.body),
        ));
    }

    let parsed: ChatResponse = serde_json::from_str(&response.body).map_err(|e| {
        DomainError::provider_parse(&config.name, format!("Failed to parse response: {}", e))
    })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::provider_parse(&config.name, "No choices in response"))?;

    let content = choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| DomainError::provider_parse(&config.name, "Empty message content"))?;

    let model = parsed.model.unwrap_or_else(|| config.model.clone());
    let mut llm_response = LlmResponse::new(
        parsed.id.unwrap_or_default(),
        model,
        Message::assistant(content),
    );

    if let Some(usage) = parsed.usage.and_then(ChatUsage::from_value) {
        llm_response = llm_response.with_usage(usage);
    }

    Ok(llm_response)
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn from_domain(message: &'a Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role,
            content: &message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    id: Option<String>,
    model: Option<String>,
    choices: Vec<ChatChoice>,
    /// Kept loose; a usage block of the wrong shape must not fail the response
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

impl ChatUsage {
    fn from_value(value: serde_json::Value) -> Option<Usage> {
        let usage: ChatUsage = serde_json::from_value(value).ok()?;

        Some(Usage::new(
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
        ))
    }
}
