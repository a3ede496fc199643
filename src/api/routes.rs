//! API route table.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, DashboardState};

/// Build the v1 API router.
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        // Telemetry
        .route("/live", get(handlers::live_data))
        .route("/history", get(handlers::history))
        // Operating mode
        .route("/mode", get(handlers::get_mode).post(handlers::set_mode))
        // Sampling control
        .route("/sampling/pause", post(handlers::pause_sampling))
        .route("/sampling/resume", post(handlers::resume_sampling))
        // Remote diagnosis
        .route(
            "/analysis",
            get(handlers::latest_analysis).post(handlers::run_analysis),
        )
        .with_state(state)
}

/// Routes outside the versioned API prefix.
pub fn legacy_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
