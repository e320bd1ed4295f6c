//! User registration, login and lookup

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CredentialsRequest, Json};
use crate::domain::User;

/// POST /api/v1/users
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .users
        .register(&request.username, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<User>, ApiError> {
    debug!(username = %request.username, "Login attempt");

    state
        .users
        .authenticate(&request.username, &request.password)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .users
        .get(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))
}
