//! The seam between story logic and whatever produces text.

use async_trait::async_trait;

use crate::error_handler::Result;

/// One prompt in, one text blob out.
///
/// Implementations perform exactly one upstream attempt per call; retries,
/// if ever wanted, belong to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`, optionally steered by a `system` message.
    ///
    /// Returns the provider's text verbatim. Blank output is an error.
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String>;
}
