//! Story-generation model config loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = `openai` (default) or `ollama`
//! - `LLM_MAX_TOKENS`   = output bound (u32, default 500)
//! - `LLM_TEMPERATURE`  = creativity (f32 in `0.0..=2.0`, default 0.8)
//! - `LLM_TOP_P`        = optional nucleus cutoff (f32 in `0.0..=1.0`)
//! - `LLM_TIMEOUT_SECS` = per-request timeout (u64, default 30)
//!
//! OpenAI-specific:
//! - `OPENAI_API_KEY`   = credential (mandatory)
//! - `OPENAI_URL`       = base URL (default `https://api.openai.com`)
//! - `OPENAI_MODEL`     = model id (default `gpt-4o-mini`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`               = model id (default `qwen3:14b`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, Lookup, must_var, opt_var, validate_http_endpoint,
        validate_range_f32, var_opt_parse,
    },
};

pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "qwen3:14b";

/// Builds the story model config from the process environment.
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_from_lookup(&|key| std::env::var(key).ok())
}

/// Builds the story model config from an arbitrary key lookup.
///
/// # Errors
///
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::MissingVar`] if `OPENAI_API_KEY` is missing for OpenAI
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad knobs
/// - [`ConfigError::InvalidFormat`] if the endpoint is not http(s)
pub fn config_from_lookup(lookup: Lookup<'_>) -> Result<LlmModelConfig, AiLlmError> {
    let provider = match opt_var(lookup, "LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::OpenAI,
    };

    let (endpoint, model, api_key) = match provider {
        LlmProvider::OpenAI => {
            let api_key = must_var(lookup, "OPENAI_API_KEY")?;
            let endpoint =
                opt_var(lookup, "OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
            validate_http_endpoint("OPENAI_URL", &endpoint)?;
            let model = opt_var(lookup, "OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
            (endpoint, model, Some(api_key))
        }
        LlmProvider::Ollama => {
            let endpoint = ollama_endpoint(lookup)?;
            let model = opt_var(lookup, "OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());
            (endpoint, model, None)
        }
    };

    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let max_tokens = var_opt_parse::<u32>(lookup, "LLM_MAX_TOKENS", "expected u32")?
        .unwrap_or(DEFAULT_MAX_TOKENS);
    if max_tokens == 0 {
        return Err(ConfigError::OutOfRange {
            field: "LLM_MAX_TOKENS",
            detail: "expected a positive number",
        }
        .into());
    }

    let temperature = var_opt_parse::<f32>(lookup, "LLM_TEMPERATURE", "expected f32")?
        .unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("LLM_TEMPERATURE", temperature, 0.0, 2.0, "expected 0.0..=2.0")?;

    let top_p = var_opt_parse::<f32>(lookup, "LLM_TOP_P", "expected f32")?;
    if let Some(p) = top_p {
        validate_range_f32("LLM_TOP_P", p, 0.0, 1.0, "expected 0.0..=1.0")?;
    }

    let timeout_secs = var_opt_parse::<u64>(lookup, "LLM_TIMEOUT_SECS", "expected u64")?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: Some(max_tokens),
        temperature: Some(temperature),
        top_p,
        timeout_secs: Some(timeout_secs),
    })
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
fn ollama_endpoint(lookup: Lookup<'_>) -> Result<String, AiLlmError> {
    if let Some(url) = opt_var(lookup, "OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = var_opt_parse::<u16>(lookup, "OLLAMA_PORT", "expected u16 (1..=65535)")? {
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}
