//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RagError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing / serialization errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required setting is absent. Raised before any network call.
    #[error("missing required configuration: {0}")]
    ConfigMissing(&'static str),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// The vector store could not be reached or rejected the request.
    #[error("index unavailable: {0}")]
    IndexUnavailable(String),

    /// The embedding model failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),
}

impl From<qdrant_client::QdrantError> for RagError {
    fn from(e: qdrant_client::QdrantError) -> Self {
        RagError::IndexUnavailable(e.to_string())
    }
}
