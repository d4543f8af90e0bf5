//! Default model configs loaded from environment variables.
//!
//! Two roles are used by the documentation pipeline:
//!
//! - **Generation** → writes documentation and use-case text
//! - **Embedding**  → vectors for project chunks and usage queries
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = provider kind (only `ollama`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//! - `LLM_TEMPERATURE` = optional sampling temperature
//! - `LLM_TIMEOUT_SECS` = request timeout (default 120)
//! - `LLM_MAX_RETRIES` = retries after a retryable failure (default 1)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = generation model (default `gemma:2b`)
//! - `EMBEDDING_MODEL`             = embedding model (default `gemma:2b`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, Result, env_opt_f32, env_opt_u32, env_opt_u64, env_or},
};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma:2b";

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_OLLAMA_URL`]
///
/// # Errors
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url.trim().to_string());
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

fn provider() -> Result<LlmProvider> {
    Ok(env_or("LLM_KIND", "ollama").parse::<LlmProvider>()?)
}

/// Constructs the config for the **generation** model.
///
/// # Defaults
/// - `temperature = Some(0.2)` unless `LLM_TEMPERATURE` is set
/// - `timeout_secs = Some(120)`
/// - `max_retries = Some(1)`
pub fn config_generation() -> Result<LlmModelConfig> {
    let cfg = LlmModelConfig {
        provider: provider()?,
        model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(0.2)),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(120)),
        max_retries: Some(env_opt_u32("LLM_MAX_RETRIES")?.unwrap_or(1)),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Constructs the config for the **embedding** model.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(60)`
pub fn config_embedding() -> Result<LlmModelConfig> {
    let cfg = LlmModelConfig {
        provider: provider()?,
        model: env_or("EMBEDDING_MODEL", DEFAULT_MODEL),
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(60),
        max_retries: Some(env_opt_u32("LLM_MAX_RETRIES")?.unwrap_or(1)),
    };
    cfg.validate()?;
    Ok(cfg)
}
