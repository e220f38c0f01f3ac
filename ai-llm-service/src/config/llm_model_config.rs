use std::fmt;

use crate::config::llm_provider::LlmProvider;

/// Configuration for one text-generation model.
///
/// # Fields
///
/// - `provider`: which backend to talk to.
/// - `model`: model identifier (e.g. `"gpt-4o-mini"`, `"qwen3:14b"`).
/// - `endpoint`: base URL of the provider, without the API path.
/// - `api_key`: bearer credential, required for OpenAI.
/// - `max_tokens`: output-length bound sent with every request.
/// - `temperature`: creativity setting; stories are meant to vary.
/// - `top_p`: optional nucleus sampling cutoff.
/// - `timeout_secs`: per-request timeout; expiry counts as a generation failure.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(500),
///     temperature: Some(0.8),
///     top_p: None,
///     timeout_secs: Some(30),
/// };
/// assert!(!format!("{cfg:?}").contains("sk-"));
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}

// Hand-written so the credential never ends up in logs.
impl fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
