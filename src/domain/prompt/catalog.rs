//! Template table used by the prompt builder

use std::collections::BTreeMap;

use serde::Serialize;

use super::context::PromptContext;
use super::template::PromptTemplate;
use crate::domain::DomainError;

pub const CHARACTER_DESCRIPTION: &str = "character_description";
pub const ENEMY_DESCRIPTION: &str = "enemy_description";
pub const LOCATION_DESCRIPTION: &str = "location_description";
pub const POTION_DESCRIPTION: &str = "potion_description";

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a creative assistant for a tabletop role-playing game master. \
Write vivid, concise prose that can be read aloud at the table. Do not use lists or headings.";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        CHARACTER_DESCRIPTION,
        "Describe ${var:name}, a level ${var:level:1} ${var:race} ${var:class}. \
         They work as ${var:occupation:an adventurer} and are ${var:alignment:true neutral} in alignment. \
         Give a short paragraph covering appearance, personality and one secret.",
    ),
    (
        ENEMY_DESCRIPTION,
        "Describe ${var:name}, a ${var:size:medium} ${var:type:creature} with challenge rating ${var:challenge_rating:1} \
         and ${var:hit_points:10} hit points. It is ${var:alignment:unaligned}. \
         Give a short paragraph on how it looks, how it fights and what it wants.",
    ),
    (
        LOCATION_DESCRIPTION,
        "Describe ${var:name}, a ${var:type:place} in ${var:region:the wilds}. \
         The mood is ${var:mood:mysterious}. ${var:details:} \
         Give a short paragraph the game master can read as the party arrives.",
    ),
    (
        POTION_DESCRIPTION,
        "Describe the potion ${var:name}, a ${var:rarity:common} brew whose effect is: ${var:effect}. \
         Give a short paragraph on its look, smell, taste and a rumour about its maker.",
    ),
];

/// A prompt ready to be sent to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltPrompt {
    pub template_id: String,
    /// System instruction sent ahead of the prompt
    pub system: String,
    /// Fully substituted user prompt
    pub text: String,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    system: String,
    body: PromptTemplate,
}

/// Table of prompt templates keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct PromptCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl PromptCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in templates
    pub fn builtin() -> Self {
        BUILTIN_TEMPLATES
            .iter()
            .fold(Self::new(), |catalog, (id, body)| catalog.with_template(*id, *body))
    }

    /// Registers a template with the default system instruction, replacing
    /// any template with the same id
    pub fn with_template(self, id: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_template_and_system(id, DEFAULT_SYSTEM_INSTRUCTION, body)
    }

    pub fn with_template_and_system(
        mut self,
        id: impl Into<String>,
        system: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            id.into(),
            CatalogEntry {
                system: system.into(),
                body: PromptTemplate::parse(body),
            },
        );
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Template identifiers in sorted order
    pub fn template_ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Builds the prompt for a template.
    ///
    /// Fails only when the template identifier is unknown.
    pub fn build(
        &self,
        template_id: &str,
        context: &PromptContext,
    ) -> Result<BuiltPrompt, DomainError> {
        let entry = self
            .entries
            .get(template_id)
            .ok_or_else(|| DomainError::template_not_found(template_id))?;

        Ok(BuiltPrompt {
            template_id: template_id.to_string(),
            system: entry.system.clone(),
            text: entry.body.render(context),
        })
    }
}
