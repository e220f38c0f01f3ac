//! GET /health: liveness plus a best-effort provider probe.

use std::sync::Arc;

use ai_llm_service::health_service::HealthStatus;
use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the provider probe failed.
    pub status: &'static str,
    pub catalog_size: usize,
    /// Absent when no concrete provider client is configured.
    pub llm: Option<HealthStatus>,
}

/// Always 200: the resolver and fallback keep working without the provider.
#[instrument(name = "health_route", skip_all)]
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let llm = match &state.llm {
        Some(service) => Some(service.health().await),
        None => None,
    };
    let status = match &llm {
        Some(h) if !h.ok => "degraded",
        _ => "ok",
    };

    Json(HealthResponse {
        status,
        catalog_size: state.catalog.len(),
        llm,
    })
}
