//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Variable without an inline default
//! - `${var:name:default}` - Variable with an inline default
//!
//! Rendering never leaves a placeholder behind. A variable missing from the
//! context takes its inline default, and failing that the documented default
//! `Unknown <name>` (so a missing `race` becomes `Unknown race`).

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::context::PromptContext;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("variable pattern is a valid regex")
});

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    /// Variable name
    pub name: String,
    /// Inline default if provided
    pub default: Option<String>,
}

impl PromptVariable {
    /// The value used when neither the context nor the template supplies one
    pub fn documented_default(&self) -> String {
        documented_default(&self.name)
    }
}

/// Documented default for a missing field: `Unknown <name>`
pub fn documented_default(name: &str) -> String {
    format!("Unknown {}", name.replace(['_', '-'], " "))
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Original template content
    content: String,
    /// Variables in order of first appearance
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen_names = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if !seen_names.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    /// Get the original template content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get all parsed variables
    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Render the template against a context.
    ///
    /// Each placeholder occurrence is resolved on its own, so repeated
    /// variables with different inline defaults are all substituted.
    /// Substituted text is not rescanned; values that look like placeholders
    /// are defused first.
    pub fn render(&self, context: &PromptContext) -> String {
        VARIABLE_PATTERN
            .replace_all(&self.content, |cap: &Captures<'_>| {
                let name = &cap[1];

                let value = context
                    .value(name)
                    .or_else(|| cap.get(2).map(|m| m.as_str().trim().to_string()))
                    .unwrap_or_else(|| documented_default(name));

                defuse(value)
            })
            .into_owned()
    }
}

/// Strips the `$` from every `${` so a value can never form a placeholder
fn defuse(mut value: String) -> String {
    while value.contains("${") {
        value = value.replace("${", "{");
    }
    value
}

/// Whether a string still contains an unresolved placeholder
pub fn has_placeholder(text: &str) -> bool {
    VARIABLE_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Hello, world!");
        assert!(!template.has_variables());
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_parse_variable_with_default() {
        let template = PromptTemplate::parse("Hello, ${var:name:World}!");
        assert_eq!(template.variables().len(), 1);

        let var = &template.variables()[0];
        assert_eq!(var.name, "name");
        assert_eq!(var.default, Some("World".to_string()));
    }

    #[test]
    fn test_parse_duplicate_variables() {
        let template = PromptTemplate::parse("${var:name} and ${var:name} again");
        assert_eq!(template.variables().len(), 1);
    }

    #[test]
    fn test_parse_underscore_names() {
        let template = PromptTemplate::parse("${var:hit_points:10}");
        assert_eq!(template.variables()[0].name, "hit_points");
    }

    #[test]
    fn test_render_from_context() {
        let template = PromptTemplate::parse("${var:name} the ${var:class}");
        let context = PromptContext::builder()
            .field("name", "Gandalf")
            .field("class", "wizard")
            .build();

        assert_eq!(template.render(&context), "Gandalf the wizard");
    }

    #[test]
    fn test_render_uses_inline_default() {
        let template = PromptTemplate::parse("A ${var:race:human} adventurer");
        let context = PromptContext::default();

        assert_eq!(template.render(&context), "A human adventurer");
    }

    #[test]
    fn test_render_uses_documented_default() {
        let template = PromptTemplate::parse("Race: ${var:race}, alignment: ${var:moral-code}");
        let context = PromptContext::default();

        assert_eq!(
            template.render(&context),
            "Race: Unknown race, alignment: Unknown moral code"
        );
    }

    #[test]
    fn test_render_repeated_variable_with_different_defaults() {
        let template = PromptTemplate::parse("${var:name:Ann} meets ${var:name:Bob}");
        let rendered = template.render(&PromptContext::default());

        assert_eq!(rendered, "Ann meets Bob");
        assert!(!has_placeholder(&rendered));
    }

    #[test]
    fn test_render_blank_value_falls_back() {
        let template = PromptTemplate::parse("${var:occupation:wanderer}");
        let context = PromptContext::builder().field("occupation", "").build();

        assert_eq!(template.render(&context), "wanderer");
    }

    #[test]
    fn test_render_empty_inline_default() {
        let template = PromptTemplate::parse("Mood: dark.${var:details:}");
        assert_eq!(template.render(&PromptContext::default()), "Mood: dark.");
    }

    #[test]
    fn test_render_defuses_placeholder_values() {
        let template = PromptTemplate::parse("${var:name} the ${var:class}");
        let context = PromptContext::builder()
            .field("name", "${var:race}")
            .field("class", "$${var:level:1}")
            .build();

        let rendered = template.render(&context);

        assert_eq!(rendered, "{var:race} the {var:level:1}");
        assert!(!has_placeholder(&rendered));
    }

    #[test]
    fn test_documented_default_name() {
        let var = PromptVariable {
            name: "hit_points".to_string(),
            default: None,
        };
        assert_eq!(var.documented_default(), "Unknown hit points");
    }
}
