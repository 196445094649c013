//! HTTP surface over the hazard snapshot store.

pub mod error;
pub mod handlers;
pub mod state;

use axum::{http, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Full application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    // The dashboard is served from a different origin and polls these routes.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]);

    handlers::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
