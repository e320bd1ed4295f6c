//! Content generation endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, GenerateRequest, Json};
use crate::domain::GenerationResult;

/// POST /api/v1/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationResult>, ApiError> {
    let provider = state
        .providers
        .resolve(request.provider.as_deref())
        .map_err(|e| ApiError::from(e).with_param("provider"))?;

    debug!(
        template = %request.template,
        provider = %provider.name,
        fields = request.context.len(),
        "Generation requested"
    );

    let result = state
        .generation
        .generate(&request.context, &request.template, provider)
        .await?;

    Ok(Json(result))
}
