//! Text-generation collaborator for the past-life backend.
//!
//! One prompt in, one text blob out. Providers (OpenAI-compatible chat
//! completions, local Ollama) are reached through [`generator::TextGenerator`],
//! so callers and tests can substitute any implementation.
//!
//! - [`config`]: provider/model configuration, loaded from the environment
//! - [`services`]: concrete HTTP clients per provider
//! - [`llm_service::LlmService`]: provider dispatch built from one config
//! - [`health_service`]: best-effort reachability probes
//! - [`error_handler`]: unified [`error_handler::AiLlmError`]
//! - [`telemetry`]: `tracing-subscriber` layer and filter helpers

pub mod config;
pub mod error_handler;
pub mod generator;
pub mod health_service;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::{config_from_env, config_from_lookup},
    llm_model_config::LlmModelConfig,
    llm_provider::LlmProvider,
};
pub use error_handler::{AiLlmError, Result};
pub use generator::TextGenerator;
pub use llm_service::LlmService;
