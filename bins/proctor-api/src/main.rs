mod handlers;
mod metrics;
mod routes;

use std::sync::Arc;

use axum::Router;
use proctor_common::config::{JudgeConfig, LanguageSettings};
use proctor_common::types::Language;
use proctor_judge::{DockerSandbox, Judge, StaticRegistry};
use tokio::net::TcpListener;
use tracing::info;

pub struct AppState {
    pub judge: Judge,
    pub sandbox: Arc<DockerSandbox>,
    pub languages: Vec<Language>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("proctor API booting...");

    let config = JudgeConfig::from_env();
    let languages = LanguageSettings::load_default().expect("Failed to load language profiles");
    let registry = StaticRegistry::load_default().expect("Failed to load reference registry");
    info!(references = registry.len(), "Reference registry loaded");

    let sandbox = Arc::new(
        DockerSandbox::connect(config, languages.clone()).expect("Failed to connect to Docker"),
    );
    let judge = Judge::new(sandbox.clone(), Arc::new(registry));

    let state = Arc::new(AppState {
        judge,
        sandbox,
        languages: languages.languages(),
    });

    let app = Router::new().merge(routes::routes()).with_state(state);

    let addr = std::env::var("PROCTOR_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!("HTTP server listening on {}", addr);
    info!("Ready to judge submissions");

    axum::serve(listener, app).await.expect("Server error");
}
