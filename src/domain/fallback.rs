//! Canned descriptions used when no provider response is available

use std::collections::HashMap;

use crate::domain::prompt::{
    PromptContext, PromptTemplate, CHARACTER_DESCRIPTION, ENEMY_DESCRIPTION, LOCATION_DESCRIPTION,
    POTION_DESCRIPTION,
};

const GENERIC_FALLBACK: &str =
    "${var:name:This subject} remains shrouded in mystery. The game master may fill in the details.";

const FALLBACK_TEMPLATES: &[(&str, &str)] = &[
    (
        CHARACTER_DESCRIPTION,
        "${var:name:The stranger} is a level ${var:level:1} ${var:race} ${var:class} \
         who works as ${var:occupation:an adventurer}. Little else is known about them yet.",
    ),
    (
        ENEMY_DESCRIPTION,
        "${var:name:The creature} is a ${var:size:medium} ${var:type:creature} \
         (challenge rating ${var:challenge_rating:1}, ${var:hit_points:10} hit points). \
         It watches the party warily.",
    ),
    (
        LOCATION_DESCRIPTION,
        "${var:name:This place} is a ${var:type:place} in ${var:region:the wilds}. \
         The air feels ${var:mood:mysterious}.",
    ),
    (
        POTION_DESCRIPTION,
        "${var:name:This potion} is a ${var:rarity:common} brew. Its effect: ${var:effect:unknown}.",
    ),
];

/// Produces template-based text without any I/O. Never fails.
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    templates: HashMap<String, PromptTemplate>,
    generic: PromptTemplate,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackGenerator {
    pub fn new() -> Self {
        let templates = FALLBACK_TEMPLATES
            .iter()
            .map(|(id, body)| (id.to_string(), PromptTemplate::parse(*body)))
            .collect();

        Self {
            templates,
            generic: PromptTemplate::parse(GENERIC_FALLBACK),
        }
    }

    /// Renders the canned text for a template, or the generic text when the
    /// template has no dedicated fallback
    pub fn generate(&self, template_id: &str, context: &PromptContext) -> String {
        let template = self.templates.get(template_id).unwrap_or(&self.generic);
        let text = template.render(context);

        if text.trim().is_empty() {
            self.generic.render(context)
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::has_placeholder;

    #[test]
    fn test_character_fallback() {
        let context = PromptContext::builder()
            .field("name", "Gandalf")
            .field("race", "elf")
            .field("class", "wizard")
            .field("level", 5)
            .build();

        let text = FallbackGenerator::new().generate(CHARACTER_DESCRIPTION, &context);
        assert_eq!(
            text,
            "Gandalf is a level 5 elf wizard who works as an adventurer. Little else is known about them yet."
        );
    }

    #[test]
    fn test_unknown_template_uses_generic_text() {
        let context = PromptContext::builder().field("name", "The Hoard").build();
        let text = FallbackGenerator::new().generate("dragon_hoard", &context);

        assert!(text.starts_with("The Hoard remains shrouded in mystery."));
    }

    #[test]
    fn test_fallback_never_empty_or_templated() {
        let generator = FallbackGenerator::new();
        let empty = PromptContext::default();

        for id in [
            CHARACTER_DESCRIPTION,
            ENEMY_DESCRIPTION,
            LOCATION_DESCRIPTION,
            POTION_DESCRIPTION,
            "anything_else",
        ] {
            let text = generator.generate(id, &empty);
            assert!(!text.trim().is_empty());
            assert!(!has_placeholder(&text));
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let generator = FallbackGenerator::new();
        let context = PromptContext::builder().field("name", "Mossy Tavern").build();

        assert_eq!(
            generator.generate(LOCATION_DESCRIPTION, &context),
            generator.generate(LOCATION_DESCRIPTION, &context)
        );
    }
}
