use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Backend used for text generation.
///
/// Selected at startup via `LLM_KIND` (`openai` or `ollama`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// OpenAI chat completions, or any server exposing the same
    /// `/v1/chat/completions` contract.
    OpenAI,
    /// Local Ollama runtime.
    Ollama,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAI => f.write_str("openai"),
            LlmProvider::Ollama => f.write_str("ollama"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
