use axum::{Json, extract::State};
use serde::Serialize;

use crate::routes::AppState;

/// Liveness report. Does not contact any target.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    #[serde(rename = "UTC_time")]
    pub utc_time: String,
    pub targets: usize,
    pub telemetry_path: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        utc_time: chrono::Utc::now().to_rfc3339(),
        targets: state.orchestrator.targets().len(),
        telemetry_path: state.telemetry_path.clone(),
    })
}
