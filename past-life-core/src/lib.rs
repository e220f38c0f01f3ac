//! Deterministic "past life" resolution.
//!
//! A name is folded into a 32-bit signed hash, and two modulo projections of
//! its magnitude select a title from a fixed [`Catalog`] and a year in
//! `[-30000, 1999]`. Everything here is pure and synchronous so it can be used
//! (and tested) without any network access.
//!
//! # Example
//! ```
//! use past_life_core::{Catalog, YearLabels};
//!
//! let catalog = Catalog::embedded().expect("embedded catalog is valid");
//! let life = catalog.resolve("Alice");
//! assert_eq!(life, catalog.resolve("Alice"));
//!
//! let label = YearLabels::korean().format(life.year);
//! assert!(label.ends_with('년'));
//! ```

pub mod catalog;
pub mod errors;
pub mod fallback;
pub mod hash;
pub mod resolver;
pub mod year_label;

pub use catalog::Catalog;
pub use errors::ConfigurationError;
pub use fallback::fallback_story;
pub use hash::{hash_magnitude, name_hash};
pub use resolver::{PastLife, YEAR_MAX, YEAR_MIN, YEAR_SPAN, resolve};
pub use year_label::YearLabels;
