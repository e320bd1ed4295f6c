//! Shared handler state

use std::sync::Arc;

use crate::infrastructure::llm::ProviderRegistry;
use crate::infrastructure::services::GenerationService;
use crate::infrastructure::user::UserService;

/// Services shared by every request; cheap to clone
#[derive(Debug, Clone)]
pub struct AppState {
    pub generation: GenerationService,
    pub providers: Arc<ProviderRegistry>,
    pub users: UserService,
}

impl AppState {
    pub fn new(
        generation: GenerationService,
        providers: ProviderRegistry,
        users: UserService,
    ) -> Self {
        Self {
            generation,
            providers: Arc::new(providers),
            users,
        }
    }
}
