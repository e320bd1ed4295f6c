//! Generation endpoint bodies

use serde::{Deserialize, Serialize};

use crate::domain::PromptContext;

/// `POST /api/v1/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub template: String,
    #[serde(default)]
    pub context: PromptContext,
    /// Configured provider name; the default provider when absent
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesResponse {
    pub templates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_parsing() {
        let request: GenerateRequest = serde_json::from_value(serde_json::json!({
            "template": "character_description",
            "context": { "name": "Gandalf", "level": 5 }
        }))
        .unwrap();

        assert_eq!(request.template, "character_description");
        assert_eq!(request.context.value("level").as_deref(), Some("5"));
        assert!(request.provider.is_none());
    }

    #[test]
    fn test_context_is_optional() {
        let request: GenerateRequest =
            serde_json::from_value(serde_json::json!({ "template": "potion_description" }))
                .unwrap();

        assert!(request.context.is_empty());
    }
}
