use ai_llm_service::AiLlmError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storyteller::StoryError;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{field} is required")]
    Validation { field: &'static str },

    #[error("failed to generate story")]
    Generation(#[source] AiLlmError),

    #[error("not found")]
    NotFound,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,

            // 5xx
            AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::NotFound => "NOT_FOUND",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    code: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            // Upstream detail stays in the log; the body carries only the summary.
            error!(error = ?self, code = self.error_code(), "request failed");
        } else {
            warn!(error = %self, code = self.error_code(), "request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.error_code(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoryError> for AppError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::Validation { field } => AppError::Validation { field },
            StoryError::Generation(e) => AppError::Generation(e),
        }
    }
}

/// Malformed bodies, wrong content type and type mismatches all map to 400.
impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{
        LlmProvider,
        error_handler::{ProviderError, ProviderErrorKind},
    };

    use super::*;

    #[test]
    fn story_errors_map_to_http_statuses() {
        let validation: AppError = StoryError::Validation { field: "title" }.into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "title is required");

        let upstream = ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::EmptyContent);
        let generation: AppError = StoryError::Generation(upstream.into()).into();
        assert_eq!(generation.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(generation.error_code(), "GENERATION_FAILED");
    }

    #[test]
    fn generation_message_hides_upstream_detail() {
        let upstream =
            ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey);
        let err = AppError::Generation(upstream.into());
        assert_eq!(err.to_string(), "failed to generate story");
    }
}
