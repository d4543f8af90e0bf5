//! Model client for the documentation pipeline.
//!
//! The crate talks to a locally hosted Ollama server and exposes:
//! - [`services::ollama_service::OllamaService`] for `/api/generate` and `/api/embed`
//! - [`generator::TextGenerator`], the seam other crates depend on instead of the concrete client
//! - [`health_service::HealthService`] for `/health` style probes
//! - [`telemetry`] helpers used by the binary to install the subscriber

pub mod config;
pub mod error_handler;
pub mod generator;
pub mod health_service;
pub mod services;
pub mod telemetry;

/// Short re-exports for the most common types.
pub mod llm {
    pub use crate::config::llm_model_config::LlmModelConfig;
    pub use crate::config::llm_provider::LlmProvider;
    pub use crate::generator::{GenerateFuture, TextGenerator};
    pub use crate::services::ollama_service::OllamaService;
}

pub use error_handler::{AiLlmError, Result};
