//! Retrieval: embed the query text and turn Qdrant payloads into hits.

use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::RagHit;

use tracing::{trace, warn};

/// Embeds `text` and returns up to `top_k` hits.
///
/// A collection that does not exist yet means nothing was indexed, which is
/// an empty answer rather than an error.
///
/// # Errors
/// Embedding failures, or `RagError::IndexUnavailable` when Qdrant fails.
pub async fn rag_context(
    cfg: &RagConfig,
    client: &QdrantFacade,
    text: &str,
    top_k: u64,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<RagHit>, RagError> {
    trace!(top_k, "retrieve::rag_context");

    if !client.collection_exists().await? {
        warn!(collection = %client.collection, "collection missing; project not indexed yet");
        return Ok(Vec::new());
    }

    let qv = provider.embed(text).await?;
    let hits = client.search(qv, top_k, cfg.exact_search).await?;

    let out: Vec<RagHit> = hits
        .into_iter()
        .map(|(score, payload)| RagHit {
            score,
            text: payload
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            path: payload
                .get("path")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
        .filter(|h| !h.text.is_empty())
        .collect();

    trace!(hits = out.len(), "retrieve::rag_context done");
    Ok(out)
}
