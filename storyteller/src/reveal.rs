//! The end-to-end flow behind one user submission.

use past_life_core::{Catalog, fallback_story};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{error::StoryError, facade::Storyteller};

/// Where the story text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorySource {
    Generated,
    Fallback,
}

/// Resolved facts plus the story to show. Always complete, even when the
/// generator failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revelation {
    pub name: String,
    pub title: String,
    pub year: i32,
    pub year_label: String,
    pub story: String,
    pub source: StorySource,
}

impl Storyteller {
    /// Resolves `name`, asks for its story once, and falls back to the local
    /// sentence on any generation failure.
    ///
    /// # Errors
    /// Only [`StoryError::Validation`] for a blank name.
    #[instrument(skip(self, catalog, name), fields(name_len = name.chars().count()))]
    pub async fn reveal(&self, catalog: &Catalog, name: &str) -> Result<Revelation, StoryError> {
        if name.trim().is_empty() {
            return Err(StoryError::Validation { field: "name" });
        }

        let life = catalog.resolve(name);
        let year_label = self.year_labels().format(life.year);
        info!(title = %life.title, year = life.year, "past life resolved");

        let (story, source) = match self.request_narrative(name, &life.title, life.year).await {
            Ok(story) => (story, StorySource::Generated),
            Err(StoryError::Generation(err)) => {
                warn!(error = %err, "serving fallback story");
                (
                    fallback_story(name, &life.title, &year_label),
                    StorySource::Fallback,
                )
            }
            Err(err) => return Err(err),
        };

        Ok(Revelation {
            name: name.to_string(),
            title: life.title,
            year: life.year,
            year_label,
            story,
            source,
        })
    }
}
