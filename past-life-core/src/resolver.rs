//! Name → `(title, year)` projection.

use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigurationError,
    hash::{hash_magnitude, name_hash},
};

/// Number of distinct years a name can land on.
pub const YEAR_SPAN: u32 = 32_000;

/// Earliest resolvable year (30000 BCE).
pub const YEAR_MIN: i32 = -30_000;

/// Latest resolvable year.
pub const YEAR_MAX: i32 = YEAR_MIN + YEAR_SPAN as i32 - 1;

/// A resolved past life. Fully determined by the name and the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PastLife {
    /// One of the catalog titles.
    pub title: String,
    /// Signed year in `[YEAR_MIN, YEAR_MAX]`; negative means BCE.
    pub year: i32,
}

/// Resolves `name` against an arbitrary title list.
///
/// Prefer [`crate::Catalog::resolve`] once a catalog is loaded; this entry
/// point exists for callers holding a plain slice.
///
/// # Errors
/// [`ConfigurationError::EmptyCatalog`] if `titles` is empty.
pub fn resolve<S: AsRef<str>>(titles: &[S], name: &str) -> Result<PastLife, ConfigurationError> {
    if titles.is_empty() {
        return Err(ConfigurationError::EmptyCatalog);
    }

    let (index, year) = project(name, titles.len());
    Ok(PastLife {
        title: titles[index].as_ref().to_owned(),
        year,
    })
}

/// Maps a name to `(title index, year)` for a catalog of `len` titles.
///
/// `len` must be non-zero; callers check.
pub(crate) fn project(name: &str, len: usize) -> (usize, i32) {
    let magnitude = hash_magnitude(name_hash(name));

    let index = magnitude as usize % len;
    // < YEAR_SPAN, fits i32
    let offset = (magnitude % YEAR_SPAN) as i32;

    (index, YEAR_MIN + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds() {
        assert_eq!(YEAR_MIN, -30_000);
        assert_eq!(YEAR_MAX, 1_999);
    }

    #[test]
    fn empty_titles_rejected() {
        let titles: [&str; 0] = [];
        let err = resolve(&titles, "Alice").unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyCatalog));
    }

    #[test]
    fn single_title_always_wins() {
        let life = resolve(&["King"], "anyone at all").unwrap();
        assert_eq!(life.title, "King");
    }

    #[test]
    fn empty_name_maps_to_first_title_and_min_year() {
        let life = resolve(&["first", "second"], "").unwrap();
        assert_eq!(life.title, "first");
        assert_eq!(life.year, YEAR_MIN);
    }

    #[test]
    fn min_hash_saturates() {
        // "polygenelubricants" hashes to i32::MIN.
        let (index, year) = project("polygenelubricants", 147);
        assert_eq!(index, (i32::MAX as usize) % 147);
        assert_eq!(year, -2_353);
    }

    #[test]
    fn small_hash_projection() {
        // hash("Bob") = 66965
        let (index, year) = project("Bob", 1000);
        assert_eq!(index, 965);
        assert_eq!(year, 66_965 % 32_000 - 30_000);
    }
}
