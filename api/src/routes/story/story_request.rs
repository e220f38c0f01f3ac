use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/story`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error naming it, not as a decode failure.
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Negative for BCE.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Response payload for `POST /api/story`.
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    /// Generated text, verbatim.
    pub story: String,
}
