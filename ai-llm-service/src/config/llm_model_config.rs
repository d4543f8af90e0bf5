use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{ConfigError, Result, validate_http_endpoint, validate_range_f32};

/// Upper bound for `max_retries`.
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which LLM backend to use.
/// - `model`: The model identifier (e.g., `"gemma:2b"`).
/// - `endpoint`: Base URL of the inference server.
/// - `api_key`: Optional key for servers behind an authenticating proxy.
/// - `max_tokens`: Maximum number of tokens to generate (`num_predict`).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Per-request timeout in seconds.
/// - `max_retries`: Retries after a retryable failure (transport, 429, 5xx).
///
/// # Examples
///
/// ```
/// use ai_llm_service::llm::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Ollama,
///     model: "gemma:2b".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     api_key: None,
///     max_tokens: Some(1024),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(120),
///     max_retries: Some(1),
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

impl LlmModelConfig {
    /// Checks the fields a request depends on before any network call is made.
    ///
    /// # Errors
    /// [`ConfigError::EmptyModel`], [`ConfigError::InvalidFormat`] for a bad
    /// endpoint scheme, or [`ConfigError::OutOfRange`] for sampling values
    /// and for `max_retries` above [`MAX_RETRIES_LIMIT`].
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("OLLAMA_URL", &self.endpoint)?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        if self.max_retries.is_some_and(|n| n > MAX_RETRIES_LIMIT) {
            return Err(ConfigError::OutOfRange {
                field: "max_retries",
                detail: "at most 10 retries",
            }
            .into());
        }
        Ok(())
    }

    /// Same config pointed at a different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "gemma:2b".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.2),
            top_p: Some(0.9),
            timeout_secs: Some(30),
            max_retries: Some(1),
        }
    }

    #[test]
    fn rejects_empty_model_and_bad_ranges() {
        assert!(base().validate().is_ok());
        assert!(base().with_model("  ").validate().is_err());

        let mut hot = base();
        hot.temperature = Some(3.5);
        assert!(hot.validate().is_err());

        let mut no_scheme = base();
        no_scheme.endpoint = "localhost:11434".into();
        assert!(no_scheme.validate().is_err());
    }

    #[test]
    fn caps_retry_count() {
        let mut cfg = base();
        cfg.max_retries = Some(MAX_RETRIES_LIMIT);
        assert!(cfg.validate().is_ok());

        cfg.max_retries = Some(32);
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("max_retries"), "{err}");
    }
}
