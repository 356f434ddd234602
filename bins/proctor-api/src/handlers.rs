// HTTP route handlers for the proctor API

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use proctor_common::types::ExecutionRequest;
use proctor_judge::JudgeError;
use serde_json::json;
use tracing::{error, info};

use crate::metrics;
use crate::AppState;

/// POST /api/execute - judge one submission
///
/// Rejected requests get a 400 with an error body; everything the judge
/// could classify comes back 200 with `{status, logs, analysis?}`.
pub async fn execute_submission(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExecutionRequest>,
) -> impl IntoResponse {
    let started = Instant::now();
    let language = request.language;

    match state.judge.execute(&request).await {
        Ok(report) => {
            let elapsed = started.elapsed();
            metrics::observe(language, report.status, elapsed);
            info!(
                language = %language,
                verdict = %report.status,
                elapsed_ms = elapsed.as_millis() as u64,
                "submission judged"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e @ (JudgeError::Request(_) | JudgeError::Configuration(_))) => {
            info!(language = %language, error = %e, "submission rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
        Err(e) => {
            error!(language = %language, error = %e, "submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// GET /healthz - liveness, including the Docker daemon behind the judge
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.sandbox.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "languages": state.languages.clone() })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /metrics - Prometheus exposition
pub async fn export_metrics() -> impl IntoResponse {
    match metrics::render() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
