//! Lightweight Ollama service for text generation and embeddings.
//!
//! This module implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate`: synchronous text generation (`stream=false`)
//! - `POST {endpoint}/api/embed`: batch embeddings
//!
//! Every request is bounded by the configured timeout. Transport failures,
//! timeouts, 429 and 5xx answers are retried `max_retries` times with a
//! doubling backoff. Other statuses and undecodable bodies fail immediately.
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::llm::{LlmModelConfig, LlmProvider, OllamaService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     provider: LlmProvider::Ollama,
//!     model: "gemma:2b".into(),
//!     endpoint: "http://localhost:11434".into(),
//!     api_key: None,
//!     max_tokens: Some(512),
//!     temperature: Some(0.2),
//!     top_p: None,
//!     timeout_secs: Some(60),
//!     max_retries: Some(1),
//! };
//!
//! let svc = OllamaService::new(cfg)?;
//! let text = svc.generate("Document `int add(int a, int b)`.").await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::time::Duration;

use reqwest::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error_handler::{AiLlmError, Result, make_snippet};
use crate::llm::LlmModelConfig;

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses one HTTP client with
/// the configured timeout.
#[derive(Debug, Clone)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    timeout: Duration,
    url_generate: String,
    url_embed: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] if the config does not validate
    /// - [`AiLlmError::ClientBuild`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        cfg.validate()?;

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut headers = header::HeaderMap::new();
        if let Some(key) = cfg.api_key.as_deref().filter(|k| !k.is_empty()) {
            if let Ok(value) = header::HeaderValue::from_str(&format!("Bearer {key}")) {
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(AiLlmError::ClientBuild)?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        let url_generate = format!("{base}/api/generate");
        let url_embed = format!("{base}/api/embed");

        Ok(Self {
            client,
            cfg,
            timeout,
            url_generate,
            url_embed,
        })
    }

    /// Model configured for this client.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Underlying config (endpoint, sampling options).
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Non-streaming generation with the configured model.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_model(prompt, &self.cfg.model).await
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`        ← argument
    /// - `prompt`       ← argument
    /// - `num_predict`  ← `self.cfg.max_tokens`
    /// - `temperature`  ← `self.cfg.temperature`
    /// - `top_p`        ← `self.cfg.top_p`
    ///
    /// # Errors
    /// - [`AiLlmError::ModelUnavailable`] for transport failures or non-2xx responses
    /// - [`AiLlmError::Timeout`] when the request exceeds the timeout on every attempt
    /// - [`AiLlmError::ModelResponseMalformed`] if the body has no `response` string
    #[instrument(skip_all, fields(model = %model, prompt_chars = prompt.len()))]
    pub async fn generate_with_model(&self, prompt: &str, model: &str) -> Result<String> {
        let body = GenerateRequest::from_cfg(&self.cfg, model, prompt);
        let out: GenerateResponse = self.post_with_retry(&self.url_generate, &body).await?;
        debug!(response_chars = out.response.len(), "generation finished");
        Ok(out.response)
    }

    /// Embeds one text with the configured model.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>> {
        let mut batch = self.embed_batch(&[input.to_string()]).await?;
        batch
            .pop()
            .ok_or_else(|| AiLlmError::ModelResponseMalformed("empty `embeddings` array".into()))
    }

    /// Retrieves embeddings for several inputs in one `/api/embed` call.
    ///
    /// The result has exactly one vector per input, in input order.
    ///
    /// # Errors
    /// Same as [`OllamaService::generate_with_model`]; additionally
    /// [`AiLlmError::ModelResponseMalformed`] if the vector count differs from
    /// the input count.
    #[instrument(skip_all, fields(model = %self.cfg.model, inputs = inputs.len()))]
    pub async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbedRequest {
            model: &self.cfg.model,
            input: inputs,
        };
        let out: EmbedResponse = self.post_with_retry(&self.url_embed, &body).await?;

        let vectors = match (out.embeddings, out.embedding) {
            (Some(many), _) => many,
            (None, Some(one)) => vec![one],
            (None, None) => {
                return Err(AiLlmError::ModelResponseMalformed(
                    "expected `embeddings` or `embedding` field".into(),
                ));
            }
        };

        if vectors.len() != inputs.len() {
            return Err(AiLlmError::ModelResponseMalformed(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }

    async fn post_with_retry<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let max_retries = self.cfg.max_retries.unwrap_or(1);
        let mut attempt = 0u32;
        loop {
            match self.post_once(url, body).await {
                Ok(out) => return Ok(out),
                Err(err) if err.is_retryable() && attempt < max_retries => {
                    let delay = retry_delay(attempt);
                    attempt += 1;
                    warn!(%url, attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying model request");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_once<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {url}");
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::ModelUnavailable {
                url: url.to_string(),
                status: Some(status),
                reason: make_snippet(&text),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        serde_json::from_slice::<R>(&bytes).map_err(|e| {
            AiLlmError::ModelResponseMalformed(format!(
                "{e}; body: {}",
                make_snippet(&String::from_utf8_lossy(&bytes))
            ))
        })
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> AiLlmError {
        if e.is_timeout() {
            AiLlmError::Timeout(self.timeout)
        } else {
            AiLlmError::ModelUnavailable {
                url: url.to_string(),
                status: None,
                reason: e.to_string(),
            }
        }
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, model: &'a str, prompt: &'a str) -> Self {
        let options = GenerateOptions {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            num_predict: cfg.max_tokens,
        };

        Self {
            model,
            prompt,
            stream: false,
            options: Some(options),
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/generate`; the generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// `/api/embed` answers with `embeddings`; older servers send a single `embedding`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Option<Vec<Vec<f32>>>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

/// Exponential backoff from [`RETRY_BASE_DELAY`], saturating instead of overflowing.
fn retry_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY.saturating_mul(2u32.saturating_pow(attempt))
}
