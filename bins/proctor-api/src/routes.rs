use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/execute", post(handlers::execute_submission))
        .route("/healthz", get(handlers::health))
        .route("/metrics", get(handlers::export_metrics))
}
