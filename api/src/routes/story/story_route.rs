//! POST /api/story: one narrative for already-resolved facts.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::instrument;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::story::story_request::{StoryRequest, StoryResponse},
};

/// Handler: POST /api/story
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/story \
///   -H 'content-type: application/json' \
///   -d '{"name":"Alice","title":"남극 탐험대의 썰매개 조련사","year":-7632}'
/// ```
#[instrument(name = "story_route", skip_all)]
pub async fn story_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StoryRequest>, JsonRejection>,
) -> AppResult<Json<StoryResponse>> {
    let Json(body) = body?;

    let name = body.name.unwrap_or_default();
    let title = body.title.unwrap_or_default();
    storyteller::facade::validate(&name, &title)?;
    let year = body.year.ok_or(AppError::Validation { field: "year" })?;

    let story = state
        .storyteller
        .request_narrative(&name, &title, year)
        .await?;

    Ok(Json(StoryResponse { story }))
}
