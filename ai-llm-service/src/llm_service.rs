//! Provider dispatch for the story model.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Builds exactly one provider client from the config; the underlying
//!   `reqwest::Client` pools connections across requests.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmService, TextGenerator, config_from_env};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmService::new(config_from_env()?)?);
//! let txt = svc.generate("Hello", Some("Be brief.")).await?;
//! println!("{txt}");
//! println!("{:?}", svc.health().await);
//! # Ok(()) }
//! ```

use async_trait::async_trait;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    generator::TextGenerator,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

#[derive(Debug)]
enum Backend {
    OpenAI(OpenAiService),
    Ollama(OllamaService),
}

/// Text generator bound to one provider config, plus its health probe.
#[derive(Debug)]
pub struct LlmService {
    cfg: LlmModelConfig,
    backend: Backend,
    health: HealthService,
}

impl LlmService {
    /// Builds the provider client for `cfg`.
    ///
    /// # Errors
    /// Provider validation errors (missing key, bad endpoint) or client build failures.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let backend = match cfg.provider {
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg.clone())?),
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg.clone())?),
        };
        let health = HealthService::new(cfg.timeout_secs.map(|t| t.min(10)))?;

        Ok(Self {
            cfg,
            backend,
            health,
        })
    }

    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Best-effort provider probe; never fails.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(&self.cfg).await
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match &self.backend {
            Backend::OpenAI(cli) => cli.generate(prompt, system).await,
            Backend::Ollama(cli) => cli.generate(prompt, system).await,
        }
    }
}
