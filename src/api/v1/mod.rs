//! Versioned API endpoints

pub mod generate;
pub mod templates;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Routes mounted under `/api/v1`
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate::generate))
        .route("/templates", get(templates::list_templates))
        .route("/users", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/{user_id}", get(users::get_user))
}
