//! Unified error handling for `ai-llm-service`.
//!
//! A single top-level error type [`AiLlmError`] covers the whole library, with
//! domain-specific enums nested inside ([`ConfigError`], [`ProviderError`],
//! [`HealthError`]). Small helpers for reading/validating configuration values
//! return the unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[AI LLM Service]` to simplify attribution in logs.

use std::{fmt, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Key → value lookup used by config loaders (`std::env::var` in production,
/// a map in tests).
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Maximum number of characters kept from an upstream error body.
const SNIPPET_MAX_CHARS: usize = 240;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider call failed: bad status, unusable payload, no content.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Health-probe failures (only surfaced by strict probes).
    #[error(transparent)]
    Health(#[from] HealthError),

    /// Underlying HTTP transport error (connect, TLS, body read).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Maps a `reqwest` error, distinguishing timeouts from other transport failures.
pub fn map_transport(err: reqwest::Error, timeout: Duration) -> AiLlmError {
    if err.is_timeout() {
        AiLlmError::Timeout(timeout)
    } else {
        AiLlmError::HttpTransport(err)
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// A numeric field was outside the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Upstream returned a non-successful HTTP status.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// Trimmed start of the response body.
    pub snippet: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

#[derive(Debug)]
pub enum ProviderErrorKind {
    /// Client constructed for the wrong provider.
    InvalidProvider,
    /// Provider requires a credential and none was configured.
    MissingApiKey,
    /// Endpoint is empty or not http(s).
    InvalidEndpoint(String),
    /// Non-2xx response.
    HttpStatus(HttpError),
    /// Response body did not have the expected shape.
    Decode(String),
    /// Well-formed response without any usable text.
    EmptyContent,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::InvalidProvider => f.write_str("config is for a different provider"),
            ProviderErrorKind::MissingApiKey => f.write_str("missing API key"),
            ProviderErrorKind::InvalidEndpoint(e) => write!(f, "invalid endpoint: {e}"),
            ProviderErrorKind::HttpStatus(e) => e.fmt(f),
            ProviderErrorKind::Decode(e) => write!(f, "decode error: {e}"),
            ProviderErrorKind::EmptyContent => f.write_str("response contained no generated text"),
        }
    }
}

#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/* ------------------------------------------------------------------------- */
/* Health errors                                                             */
/* ------------------------------------------------------------------------- */

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// The endpoint is empty or does not start with http/https.
    #[error("[AI LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] {0}")]
    HttpStatus(HttpError),

    /// Probe could not be built or decoded.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),
}

/// Trims an upstream body to a short single-line snippet for logs and errors.
pub fn make_snippet(text: &str) -> String {
    let flat = text.trim().replace(['\n', '\r'], " ");
    if flat.chars().count() > SNIPPET_MAX_CHARS {
        let mut s: String = flat.chars().take(SNIPPET_MAX_CHARS).collect();
        s.push('…');
        s
    } else {
        flat
    }
}

/* ------------------------------------------------------------------------- */
/* Config helpers (return unified `Result<T>`)                               */
/* ------------------------------------------------------------------------- */

/// Returns a variable only if present and non-blank.
pub fn opt_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// Fetches a required, non-empty variable.
///
/// # Errors
/// [`ConfigError::MissingVar`] if the variable is absent or blank.
pub fn must_var(lookup: Lookup<'_>, name: &'static str) -> Result<String> {
    opt_var(lookup, name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

/// Parses an optional number (`Ok(None)` if unset/blank).
///
/// # Errors
/// [`ConfigError::InvalidNumber`] if the variable is set but unparsable.
pub fn var_opt_parse<T: std::str::FromStr>(
    lookup: Lookup<'_>,
    name: &'static str,
    reason: &'static str,
) -> Result<Option<T>> {
    match opt_var(lookup, name) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a float lies within an inclusive range.
pub fn validate_range_f32(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    detail: &'static str,
) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_flat_and_bounded() {
        assert_eq!(make_snippet("  a\nb  "), "a b");
        let long = "x".repeat(500);
        let s = make_snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_MAX_CHARS + 1);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("X", "https://api.openai.com").is_ok());
        assert!(validate_http_endpoint("X", "api.openai.com").is_err());
    }

    #[test]
    fn range_rejects_nan() {
        assert!(validate_range_f32("t", 0.8, 0.0, 2.0, "0.0..=2.0").is_ok());
        assert!(validate_range_f32("t", f32::NAN, 0.0, 2.0, "0.0..=2.0").is_err());
        assert!(validate_range_f32("t", 2.5, 0.0, 2.0, "0.0..=2.0").is_err());
    }

    #[test]
    fn provider_error_message_is_attributed() {
        let err: AiLlmError =
            ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::EmptyContent).into();
        assert_eq!(
            err.to_string(),
            "[AI LLM Service] openai: response contained no generated text"
        );
    }
}
