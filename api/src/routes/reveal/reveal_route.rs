//! POST /api/reveal: resolve a name and tell its story, falling back locally.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use storyteller::Revelation;
use tracing::instrument;

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::reveal::reveal_request::RevealRequest,
};

/// Handler: POST /api/reveal
///
/// Generation failures never reach the caller; the response then carries
/// `"source": "fallback"`.
#[instrument(name = "reveal_route", skip_all)]
pub async fn reveal_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RevealRequest>, JsonRejection>,
) -> AppResult<Json<Revelation>> {
    let Json(body) = body?;
    let name = body.name.unwrap_or_default();

    let revelation = state.storyteller.reveal(&state.catalog, &name).await?;
    Ok(Json(revelation))
}
