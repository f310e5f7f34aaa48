use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::collector::ScrapeOrchestrator;
use crate::handlers::{health, landing, metrics};
use crate::metrics::MetricDescriptors;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScrapeOrchestrator>,
    pub descriptors: Arc<MetricDescriptors>,
    pub telemetry_path: String,
}

pub fn create_router(state: AppState) -> Router {
    let telemetry_path = state.telemetry_path.clone();

    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .route(&telemetry_path, get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
