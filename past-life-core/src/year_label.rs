//! Era-qualified year labels ("서기 1999년", "기원전 7632년", ...).
//!
//! Only the sign-to-era mapping is fixed: non-negative years use the CE
//! template, negative years use the BCE template with the absolute value.
//! The wording itself is configuration.

use std::str::FromStr;

use crate::errors::ConfigurationError;

const PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearLabels {
    ce: String,
    bce: String,
}

impl YearLabels {
    /// Custom templates; both must contain `{year}`.
    pub fn new(ce: impl Into<String>, bce: impl Into<String>) -> Result<Self, ConfigurationError> {
        let ce = ce.into();
        let bce = bce.into();
        if !ce.contains(PLACEHOLDER) {
            return Err(ConfigurationError::YearTemplate { which: "CE" });
        }
        if !bce.contains(PLACEHOLDER) {
            return Err(ConfigurationError::YearTemplate { which: "BCE" });
        }
        Ok(Self { ce, bce })
    }

    pub fn korean() -> Self {
        Self {
            ce: "서기 {year}년".into(),
            bce: "기원전 {year}년".into(),
        }
    }

    pub fn english() -> Self {
        Self {
            ce: "{year} CE".into(),
            bce: "{year} BCE".into(),
        }
    }

    /// Renders `year` with the era matching its sign.
    pub fn format(&self, year: i32) -> String {
        if year >= 0 {
            self.ce.replace(PLACEHOLDER, &year.to_string())
        } else {
            self.bce
                .replace(PLACEHOLDER, &year.unsigned_abs().to_string())
        }
    }
}

impl Default for YearLabels {
    fn default() -> Self {
        Self::korean()
    }
}

impl FromStr for YearLabels {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "korean" => Ok(Self::korean()),
            "en" | "english" => Ok(Self::english()),
            other => Err(ConfigurationError::UnknownYearLabelStyle(other.to_string())),
        }
    }
}
