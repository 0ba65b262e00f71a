//! Main HTTP relay server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use codereview_config::RelayConfig;
use codereview_core::LlmProvider;

use crate::health_api;
use crate::review_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct RelayState {
    pub provider: Arc<dyn LlmProvider>,
}

impl RelayState {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

/// Build the Axum router with all relay routes and layers.
pub fn build_router(state: RelayState, config: &RelayConfig) -> Router {
    let router = Router::new()
        .route("/review", post(review_api::review))
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Starts the relay and serves until Ctrl-C.
#[instrument(skip(state, config))]
pub async fn start_server(state: RelayState, config: &RelayConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, config.port))?;

    let provider = state.provider.name().to_string();
    let model = state.provider.model().to_string();
    let app = build_router(state, config);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, %provider, %model, "Relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
