//! Prompt domain - contexts, templates and the template catalog

mod catalog;
mod context;
mod template;

pub use catalog::{
    BuiltPrompt, PromptCatalog, CHARACTER_DESCRIPTION, ENEMY_DESCRIPTION, LOCATION_DESCRIPTION,
    POTION_DESCRIPTION,
};
pub use context::{ContextValue, PromptContext, PromptContextBuilder};
pub use template::{documented_default, has_placeholder, PromptTemplate, PromptVariable};
