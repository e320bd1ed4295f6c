//! Template listing endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{Json, TemplatesResponse};

/// GET /api/v1/templates
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    let templates = state
        .generation
        .catalog()
        .template_ids()
        .into_iter()
        .map(String::from)
        .collect();

    Json(TemplatesResponse { templates })
}
