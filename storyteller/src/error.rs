//! Typed error for the storyteller crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
    /// A required input was empty or whitespace-only. Caller-correctable,
    /// never retried.
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// The text generator was unreachable or returned nothing usable.
    #[error("failed to generate story: {0}")]
    Generation(#[from] AiLlmError),
}

impl StoryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoryError::Validation { .. })
    }
}
