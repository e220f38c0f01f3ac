//! Narrative request façade for resolved past lives.
//!
//! [`Storyteller::request_narrative`] validates its input, renders the prompt
//! and performs exactly one call to the configured
//! [`ai_llm_service::TextGenerator`]. [`Storyteller::reveal`] is the full
//! user-facing flow: resolve the name, ask for a story, and substitute the
//! local fallback sentence if generation fails.

pub mod error;
pub mod facade;
pub mod prompt;
pub mod reveal;

pub use error::StoryError;
pub use facade::Storyteller;
pub use prompt::PromptTemplate;
pub use reveal::{Revelation, StorySource};
