//! The vector index as the rest of the workspace sees it.
//!
//! Two operations only. [`crate::RagStore`] implements them over Qdrant;
//! tests implement them in memory.

use std::{future::Future, pin::Pin};

use crate::errors::RagError;
use crate::record::{IndexChunk, RagHit};

/// Boxed future returned by [`VectorIndex`] operations.
pub type IndexFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RagError>> + Send + 'a>>;

pub trait VectorIndex: Send + Sync {
    /// Embeds and stores `chunks`; re-upserting a chunk with the same id replaces it.
    /// Returns the number of chunks stored.
    fn upsert<'a>(&'a self, chunks: &'a [IndexChunk]) -> IndexFuture<'a, usize>;

    /// Up to `k` snippets most similar to `text`, best first.
    fn query<'a>(&'a self, text: &'a str, k: u64) -> IndexFuture<'a, Vec<RagHit>>;
}
