use anyhow::Context;
use api_client::PriceSeriesProvider;
use axum::{Router, routing::get};
use configuration::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub provider: Arc<dyn PriceSeriesProvider>,
}

/// Builds the dashboard router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/analyze", get(handlers::analyze))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing is expected to be initialized by the caller.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    let provider = analyzer::provider_from_config(&config.data)
        .context("Failed to build the price provider")?;
    let app = router(Arc::new(AppState { config, provider }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
