//! GET /api/past-life?name=...: resolver only, no generator call.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::{debug, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::past_life::past_life_request::{PastLifeQuery, PastLifeResponse},
};

#[instrument(name = "past_life_route", skip_all)]
pub async fn past_life_route(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PastLifeQuery>, QueryRejection>,
) -> AppResult<Json<PastLifeResponse>> {
    let Query(query) = query?;
    let name = query.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(AppError::Validation { field: "name" });
    }

    let life = state.catalog.resolve(&name);
    let year_label = state.storyteller.year_labels().format(life.year);
    debug!(title = %life.title, year = life.year, "past life resolved");

    Ok(Json(PastLifeResponse {
        name,
        title: life.title,
        year: life.year,
        year_label,
    }))
}
