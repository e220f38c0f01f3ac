//! `request_narrative`: one validated round trip to the text generator.

use std::sync::Arc;

use ai_llm_service::TextGenerator;
use past_life_core::YearLabels;
use tracing::{debug, info, instrument, warn};

use crate::{error::StoryError, prompt::PromptTemplate};

/// Checks the inputs `request_narrative` requires, name first.
pub fn validate(name: &str, title: &str) -> Result<(), StoryError> {
    if name.trim().is_empty() {
        return Err(StoryError::Validation { field: "name" });
    }
    if title.trim().is_empty() {
        return Err(StoryError::Validation { field: "title" });
    }
    Ok(())
}

/// Builds prompts for resolved past lives and forwards them to a
/// [`TextGenerator`].
///
/// Cheap to share behind an `Arc`; holds no mutable state.
pub struct Storyteller {
    generator: Arc<dyn TextGenerator>,
    template: PromptTemplate,
    labels: YearLabels,
}

impl Storyteller {
    /// Default Korean prompt and year labels.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            template: PromptTemplate::default(),
            labels: YearLabels::default(),
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_year_labels(mut self, labels: YearLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn year_labels(&self) -> &YearLabels {
        &self.labels
    }

    /// Asks the generator for a story about `name` having been `title` in `year`.
    ///
    /// Exactly one upstream attempt; the text comes back verbatim, blank-line
    /// paragraphs included.
    ///
    /// # Errors
    /// - [`StoryError::Validation`] if `name` or `title` is blank (no upstream call)
    /// - [`StoryError::Generation`] for any generator failure
    #[instrument(skip(self, name), fields(name_len = name.chars().count()))]
    pub async fn request_narrative(
        &self,
        name: &str,
        title: &str,
        year: i32,
    ) -> Result<String, StoryError> {
        validate(name, title)?;

        let year_label = self.labels.format(year);
        let prompt = self.template.render(name, title, &year_label);
        debug!(prompt_len = prompt.len(), %year_label, "rendered story prompt");

        match self
            .generator
            .generate(&prompt, Some(self.template.system()))
            .await
        {
            Ok(story) => {
                info!(chars = story.chars().count(), "story generated");
                Ok(story)
            }
            Err(err) => {
                warn!(error = %err, "story generation failed");
                Err(StoryError::Generation(err))
            }
        }
    }
}
