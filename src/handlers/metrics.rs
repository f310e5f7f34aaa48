use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::formatter::PrometheusFormatter;
use crate::routes::AppState;

/// Runs one scrape of every target and renders it.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let samples = state.orchestrator.scrape().await;

    match PrometheusFormatter::to_text_string(&state.descriptors, samples) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, PrometheusFormatter::content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n<head><title>APC Environment Exporter</title></head>\n<body>\n\
         <h1>APC Environment Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n</html>\n",
        path = state.telemetry_path
    ))
}
