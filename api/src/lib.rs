//! HTTP surface of the past-life backend.

use std::sync::Arc;

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::{AppState, ServerConfig},
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::request_id,
    routes::{
        health_route::health_route, past_life::past_life_route::past_life_route,
        reveal::reveal_route::reveal_route, story::story_route::story_route,
    },
};

/// Loads configuration from the environment, binds `API_ADDRESS` and serves
/// until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.address, "past-life backend listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Builds the full router over `state`. Used by [`start`] and by tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/story", post(story_route))
        .route("/api/reveal", post(reveal_route))
        .route("/api/past-life", get(past_life_route))
        .route("/health", get(health_route))
        .fallback(not_found)
        .layer(middleware::from_fn(request_id))
        .with_state(Arc::new(state))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
