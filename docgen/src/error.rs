//! Typed error for the docgen crate.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocgenError {
    /// The Java source could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] code_indexer::Error),

    /// Vector index, embedding, or index config failure.
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// Text generation failure.
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Scratch directory could not be prepared.
    #[error("staging error: {0}")]
    Staging(#[from] services::staging::StagingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    /// The operation was cancelled by the caller.
    #[error("operation cancelled")]
    Cancelled,
}
