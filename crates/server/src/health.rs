use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    catalog_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(catalog_size: usize) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { catalog_size })
}

/// The catalog and template are immutable once bootstrap succeeds, so a
/// running server is always ready; the payload exists for operators.
pub async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready",
        catalog: HealthCheck {
            status: "ready",
            detail: format!("{} products loaded", state.catalog_size),
        },
        checked_at: Utc::now().to_rfc3339(),
    })
}
