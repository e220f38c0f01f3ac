//! Startup-time configuration errors.
//!
//! None of these are expected at request time: a process that fails to build
//! its catalog or year labels should refuse to start.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The title catalog has no entries; no index can be computed.
    #[error("past-life catalog must contain at least one title")]
    EmptyCatalog,

    /// A catalog entry is empty or whitespace-only.
    #[error("past-life catalog entry #{index} is blank")]
    BlankTitle { index: usize },

    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not `{"titles": [...]}`.
    #[error("malformed catalog document: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// A year-label template lacks the `{year}` placeholder.
    #[error("{which} year label template must contain `{{year}}`")]
    YearTemplate { which: &'static str },

    /// Unknown `YEAR_LABEL_STYLE` value.
    #[error("unknown year label style: {0} (expected `ko` or `en`)")]
    UnknownYearLabelStyle(String),
}
