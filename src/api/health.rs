//! Health probes

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::cache::{CacheKey, CacheKeyParams};

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

const PROBE_TTL: Duration = Duration::from_secs(60);

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready
///
/// Probes the cache backend with a write, read and delete. A broken cache
/// only degrades generation, so the service still reports 200.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let cache_check = check_cache(&state).await;

    let response = HealthResponse {
        status: cache_check.status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![cache_check]),
    };

    (StatusCode::OK, Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_cache(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let cache = state.generation.cache();
    let probe = CacheKey::from_params(&CacheKeyParams::new("readiness-probe"));

    let round_trip = async {
        cache.put(&probe, "ok", PROBE_TTL).await?;
        cache.get(&probe).await?;
        cache.delete(&probe).await
    };

    let (status, message) = match round_trip.await {
        Ok(_) => (HealthStatus::Healthy, None),
        Err(e) => (HealthStatus::Degraded, Some(e.to_string())),
    };

    HealthCheck {
        name: format!("cache:{}", cache.backend_name()),
        status,
        message,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}
