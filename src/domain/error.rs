use std::time::Duration;

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Template not found: {template_id}")]
    TemplateNotFound { template_id: String },

    #[error("Provider timeout: {provider} did not respond within {}ms", .timeout.as_millis())]
    ProviderTimeout { provider: String, timeout: Duration },

    /// `body` is the upstream response excerpt. It stays out of `Display`
    /// because that text reaches API clients.
    #[error("Provider HTTP error: {provider} - HTTP {status}")]
    ProviderHttp {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Provider parse error: {provider} - {message}")]
    ProviderParse { provider: String, message: String },

    #[error("Provider unavailable: {provider} - {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Cache unavailable: {message}")]
    CacheUnavailable { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn template_not_found(template_id: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template_id: template_id.into(),
        }
    }

    pub fn provider_timeout(provider: impl Into<String>, timeout: Duration) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            timeout,
        }
    }

    pub fn provider_http(
        provider: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::ProviderHttp {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    pub fn provider_parse(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderParse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn provider_unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn cache_unavailable(message: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the failure came from the provider call
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderTimeout { .. }
                | Self::ProviderHttp { .. }
                | Self::ProviderParse { .. }
                | Self::ProviderUnavailable { .. }
        )
    }

    /// Whether a provider call that failed this way may be retried.
    ///
    /// Timeouts, transport failures and 5xx responses are transient; 4xx
    /// responses and unparseable bodies are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ProviderTimeout { .. } | Self::ProviderUnavailable { .. } => true,
            Self::ProviderHttp { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_not_found_error() {
        let error = DomainError::template_not_found("dragon_hoard");
        assert_eq!(error.to_string(), "Template not found: dragon_hoard");
    }

    #[test]
    fn test_provider_timeout_message() {
        let error = DomainError::provider_timeout("openai", Duration::from_secs(15));
        assert_eq!(
            error.to_string(),
            "Provider timeout: openai did not respond within 15000ms"
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(DomainError::provider_timeout("p", Duration::from_secs(1)).is_transient());
        assert!(DomainError::provider_unavailable("p", "connection refused").is_transient());
        assert!(DomainError::provider_http("p", 500, "boom").is_transient());
        assert!(DomainError::provider_http("p", 503, "busy").is_transient());

        assert!(!DomainError::provider_http("p", 400, "bad").is_transient());
        assert!(!DomainError::provider_http("p", 429, "slow down").is_transient());
        assert!(!DomainError::provider_parse("p", "garbage").is_transient());
        assert!(!DomainError::cache_unavailable("disk").is_transient());
    }

    #[test]
    fn test_provider_error_classification() {
        assert!(DomainError::provider_parse("p", "x").is_provider_error());
        assert!(!DomainError::template_not_found("x").is_provider_error());
        assert!(!DomainError::cache_unavailable("x").is_provider_error());
    }

    #[test]
    fn test_provider_http_display_hides_body() {
        let error = DomainError::provider_http("openai", 401, "Incorrect API key: sk-ab***yz");
        assert_eq!(error.to_string(), "Provider HTTP error: openai - HTTP 401");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }
}
