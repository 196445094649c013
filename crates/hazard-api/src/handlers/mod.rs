use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

pub mod alerts;
pub mod risk;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/update_trigger", post(risk::update_trigger))
        .route("/hotspots", get(risk::hotspots))
        .route("/cells/:id", get(risk::cell))
        .route("/check_alert", get(alerts::check_alert))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cells: usize,
    pub generation: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snap = state.store.current();
    Json(HealthResponse { status: "ok", cells: snap.len(), generation: snap.generation() })
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use hazard_core::{GridSpec, ServiceConfig};

    let config = ServiceConfig {
        grid: GridSpec::centred(20, 10, 77.17, 31.10),
        ..ServiceConfig::default()
    };
    AppState::from_config(config).unwrap()
}
