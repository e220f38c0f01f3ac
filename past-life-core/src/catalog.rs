//! Immutable title catalog.
//!
//! Loaded once at startup (embedded JSON or a file override) and shared
//! read-only afterwards. A `Catalog` is never empty, so resolving against it
//! cannot fail.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    errors::ConfigurationError,
    resolver::{PastLife, project},
};

/// Default titles shipped with the crate.
const EMBEDDED_TITLES: &str = include_str!("../data/titles.json");

/// On-disk shape: `{ "titles": ["...", ...] }`.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    titles: Vec<String>,
}

/// Ordered, non-empty list of past-life titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    titles: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from an ordered title list.
    ///
    /// # Errors
    /// - [`ConfigurationError::EmptyCatalog`] if `titles` is empty
    /// - [`ConfigurationError::BlankTitle`] if any title is blank
    pub fn new(titles: Vec<String>) -> Result<Self, ConfigurationError> {
        if titles.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        if let Some(index) = titles.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigurationError::BlankTitle { index });
        }
        Ok(Self { titles })
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigurationError> {
        Self::from_json_str(EMBEDDED_TITLES)
    }

    /// Parses a `{"titles": [...]}` document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.titles)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        debug!(path = %path.display(), "reading catalog file");
        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigurationError::CatalogRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!(path = %path.display(), titles = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Resolves a name to its past life. Total over all strings.
    pub fn resolve(&self, name: &str) -> PastLife {
        let (index, year) = project(name, self.titles.len());
        PastLife {
            title: self.titles[index].clone(),
            year,
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 147);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(0), Some("고대 이집트의 피라미드 설계자"));
    }

    #[test]
    fn alice_regression_fixture() {
        let catalog = Catalog::embedded().unwrap();
        let life = catalog.resolve("Alice");
        assert_eq!(life.title, "남극 탐험대의 썰매개 조련사");
        assert_eq!(life.year, -7_632);
    }

    #[test]
    fn min_hash_name_resolves_to_valid_title() {
        let catalog = Catalog::embedded().unwrap();
        let life = catalog.resolve("polygenelubricants");
        assert_eq!(life.title, "골드러시 시대의 금광 채굴꾼");
        assert_eq!(life.year, -2_353);
        assert!(catalog.contains(&life.title));
    }

    #[test]
    fn empty_list_is_configuration_error() {
        assert!(matches!(
            Catalog::new(Vec::new()),
            Err(ConfigurationError::EmptyCatalog)
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"titles": []}"#),
            Err(ConfigurationError::EmptyCatalog)
        ));
    }

    #[test]
    fn blank_entry_is_rejected() {
        let err = Catalog::new(vec!["King".into(), "  ".into()]).unwrap_err();
        assert!(matches!(err, ConfigurationError::BlankTitle { index: 1 }));
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(matches!(
            Catalog::from_json_str(r#"["King"]"#),
            Err(ConfigurationError::CatalogParse(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Catalog::from_path(Path::new("/definitely/not/here/titles.json")).unwrap_err();
        assert!(matches!(err, ConfigurationError::CatalogRead { .. }));
    }

    #[test]
    fn file_override_is_loaded_and_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.json");
        std::fs::write(&path, r#"{"titles": ["King", "Queen", "Jester"]}"#).unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.titles(), ["King", "Queen", "Jester"]);

        // 63350368 % 3 == 1
        assert_eq!(catalog.resolve("Alice").title, "Queen");
        assert_eq!(catalog.resolve("Alice").year, -7_632);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.json");
        std::fs::write(&path, "titles: King").unwrap();

        assert!(matches!(
            Catalog::from_path(&path),
            Err(ConfigurationError::CatalogParse(_))
        ));
    }

    #[test]
    fn catalog_agrees_with_slice_resolver() {
        let catalog = Catalog::new(vec!["King".into(), "Queen".into(), "Jester".into()]).unwrap();
        for name in ["Alice", "Bob", "", "홍길동", "😀"] {
            assert_eq!(
                catalog.resolve(name),
                crate::resolver::resolve(catalog.titles(), name).unwrap()
            );
        }
    }
}
