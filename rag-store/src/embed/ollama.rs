//! Ollama embedding provider backed by the shared model client.

use std::sync::Arc;

use ai_llm_service::llm::OllamaService;

use super::{EmbedFuture, EmbeddingsProvider};
use crate::errors::RagError;

/// Ollama embedding provider (async).
#[derive(Clone)]
pub struct OllamaEmbedder {
    svc: Arc<OllamaService>,
    /// Expected width; checked on every vector when set.
    dim: Option<usize>,
}

impl OllamaEmbedder {
    pub fn new(svc: Arc<OllamaService>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }

    fn check_dim(&self, v: &[f32]) -> Result<(), RagError> {
        match self.dim {
            Some(want) if v.len() != want => Err(RagError::VectorSizeMismatch { got: v.len(), want }),
            _ => Ok(()),
        }
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move {
            let v = self.svc.embed(text).await?;
            self.check_dim(&v)?;
            Ok(v)
        })
    }

    fn embed_batch<'a>(&'a self, texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>> {
        Box::pin(async move {
            let vectors = self.svc.embed_batch(texts).await?;
            for v in &vectors {
                self.check_dim(v)?;
            }
            Ok(vectors)
        })
    }
}
