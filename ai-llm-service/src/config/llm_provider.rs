use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used for large language model inference.
///
/// Only a local Ollama runtime is wired up today. `LLM_KIND` is parsed through
/// [`FromStr`] so an unexpected value fails loudly instead of silently
/// falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    #[default]
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
