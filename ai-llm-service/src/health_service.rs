//! Reachability probes for the text-generation provider.
//!
//! - Ollama: `GET {endpoint}/api/tags` (best-effort model existence check)
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth (best-effort model existence check)
//!
//! [`HealthService::check`] never fails; errors become `ok = false`. The
//! provider-specific `try_*` probes return a strict `Result`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, make_snippet, map_transport};

/// Serializable health snapshot for one provider config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub ok: bool,
    pub latency_ms: u128,
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: cfg.provider.to_string(),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker reusing a single HTTP client.
#[derive(Debug)]
pub struct HealthService {
    client: reqwest::Client,
    timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional probe timeout (seconds, default 10).
    ///
    /// # Errors
    /// [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        debug!(timeout_secs = timeout.as_secs(), "HealthService initialized");

        Ok(Self { client, timeout })
    }

    /// Checks one config. Never returns an error.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let start = Instant::now();
        let result = match cfg.provider {
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
            LlmProvider::OpenAI => self.try_probe_openai(cfg).await,
        };

        match result {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    model = %status.model,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status = HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Strict Ollama probe: `GET /api/tags`, then look for the model name.
    pub async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        let url = probe_url(cfg, "/api/tags")?;
        let start = Instant::now();
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_transport(e, self.timeout))?;
        let latency = start.elapsed().as_millis();
        let resp = ensure_success(resp, url).await?;

        let status = match resp.json::<Tags>().await {
            Ok(Tags {
                models: Some(models),
            }) => {
                if models.iter().any(|m| m.name == cfg.model) {
                    HealthStatus::new(cfg, true, latency, "Ollama is healthy; model is available")
                } else {
                    HealthStatus::new(cfg, false, latency, "Ollama is up, but model not found in /api/tags")
                }
            }
            Ok(Tags { models: None }) => HealthStatus::new(
                cfg,
                true,
                latency,
                "Ollama is healthy; tags response without `models` field",
            ),
            Err(e) => HealthStatus::new(
                cfg,
                true,
                latency,
                format!("Ollama is reachable; failed to decode /api/tags: {e}"),
            ),
        };
        Ok(status)
    }

    /// Strict OpenAI probe: `GET /v1/models` with Bearer auth.
    pub async fn try_probe_openai(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        #[derive(Deserialize)]
        struct ModelItem {
            id: String,
        }
        #[derive(Deserialize)]
        struct Models {
            data: Vec<ModelItem>,
        }

        let url = probe_url(cfg, "/v1/models")?;
        let api_key = cfg
            .api_key
            .as_deref()
            .ok_or_else(|| HealthError::Decode("missing OpenAI API key".into()))?;
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HealthError::Decode(format!("invalid API key header: {e}")))?;
        auth.set_sensitive(true);

        let start = Instant::now();
        let resp = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| map_transport(e, self.timeout))?;
        let latency = start.elapsed().as_millis();
        let resp = ensure_success(resp, url).await?;

        let status = match resp.json::<Models>().await {
            Ok(models) if models.data.iter().any(|m| m.id == cfg.model) => {
                HealthStatus::new(cfg, true, latency, "OpenAI is healthy; model is available")
            }
            Ok(_) => HealthStatus::new(cfg, false, latency, "OpenAI is up, but model not found in /v1/models"),
            Err(e) => HealthStatus::new(
                cfg,
                true,
                latency,
                format!("OpenAI is reachable; failed to decode /v1/models: {e}"),
            ),
        };
        Ok(status)
    }
}

fn probe_url(cfg: &LlmModelConfig, path: &str) -> Result<String, AiLlmError> {
    let endpoint = cfg.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(HealthError::InvalidEndpoint(cfg.endpoint.clone()).into());
    }
    Ok(format!("{}{path}", endpoint.trim_end_matches('/')))
}

async fn ensure_success(resp: reqwest::Response, url: String) -> Result<reqwest::Response, AiLlmError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    Err(HealthError::HttpStatus(HttpError {
        status,
        url,
        snippet: make_snippet(&text),
    })
    .into())
}
