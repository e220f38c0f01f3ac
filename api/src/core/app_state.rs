use std::{path::PathBuf, sync::Arc};

use ai_llm_service::{AiLlmError, LlmService, config_from_env};
use past_life_core::{Catalog, ConfigurationError, YearLabels};
use storyteller::Storyteller;
use thiserror::Error;
use tracing::info;

const DEFAULT_API_ADDRESS: &str = "127.0.0.1:3000";

/// Startup configuration failures. Fatal; the server does not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Catalog(#[from] ConfigurationError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Process-level settings that are not owned by a library crate.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, e.g. "127.0.0.1:3000".
    pub address: String,
    /// Optional catalog override; the embedded catalog is used otherwise.
    pub catalog_path: Option<PathBuf>,
    /// Era wording for year labels.
    pub year_labels: YearLabels,
}

impl ServerConfig {
    /// Load from `API_ADDRESS`, `PAST_LIFE_CATALOG` and `YEAR_LABEL_STYLE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = non_blank_env("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into());
        let catalog_path = non_blank_env("PAST_LIFE_CATALOG").map(PathBuf::from);
        let year_labels = match non_blank_env("YEAR_LABEL_STYLE") {
            Some(style) => style.parse()?,
            None => YearLabels::default(),
        };

        Ok(Self {
            address,
            catalog_path,
            year_labels,
        })
    }

    /// Loads the configured catalog, embedded if no override is set.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::embedded()?,
        };
        Ok(catalog)
    }
}

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Title catalog used by the resolver.
    pub catalog: Arc<Catalog>,
    /// Narrative façade bound to the configured text generator.
    pub storyteller: Arc<Storyteller>,
    /// Concrete provider client, when one is configured; used by `/health`.
    pub llm: Option<Arc<LlmService>>,
}

impl AppState {
    pub fn new(catalog: Catalog, storyteller: Storyteller) -> Self {
        Self {
            catalog: Arc::new(catalog),
            storyteller: Arc::new(storyteller),
            llm: None,
        }
    }

    /// Build the production state: catalog, provider client and façade.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let catalog = config.load_catalog()?;
        let llm = Arc::new(LlmService::new(config_from_env()?)?);

        info!(
            titles = catalog.len(),
            provider = %llm.config().provider,
            model = %llm.config().model,
            "application state ready"
        );

        let storyteller =
            Storyteller::new(llm.clone()).with_year_labels(config.year_labels.clone());

        Ok(Self {
            llm: Some(llm),
            ..Self::new(catalog, storyteller)
        })
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
