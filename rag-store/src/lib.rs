//! Vector index for Java project sources: chunking + embedding + Qdrant.
//!
//! This crate provides:
//! - [`chunk_text`] / [`index_project`] to split a project into character windows and store them
//! - [`VectorIndex`], the two-operation view (`upsert`, `query`) the rest of the workspace uses
//! - [`RagStore`], the Qdrant-backed implementation
//!
//! The design is flat and splits responsibilities into focused modules.

mod chunking;
mod config;
mod embed;
mod errors;
mod index;
mod ingest;
mod progress;
mod qdrant_facade;
mod record;
mod retrieve;

use std::sync::Arc;

pub use chunking::{ChunkingConfig, chunk_text};
pub use config::{DistanceKind, RagConfig, VectorSpace};
pub use embed::{EmbedFuture, EmbeddingsProvider, ollama::OllamaEmbedder};
pub use errors::RagError;
pub use index::{IndexFuture, VectorIndex};
pub use ingest::index_project;
pub use progress::{IndicatifProgress, NoopProgress, Progress, reporter};
pub use record::{IndexChunk, IndexReport, RagHit, SourceFile};

use tracing::{debug, info, instrument, trace};

/// Qdrant-backed [`VectorIndex`].
///
/// Owns the embedding provider it needs, so callers construct one per
/// operation and pass it where a `&dyn VectorIndex` is expected.
pub struct RagStore {
    cfg: RagConfig,
    client: qdrant_facade::QdrantFacade,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl RagStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `RagError::ConfigMissing`/`RagError::Config` for invalid config,
    /// `RagError::IndexUnavailable` if the client cannot be built.
    pub fn new(cfg: RagConfig, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Self, RagError> {
        trace!(collection = %cfg.collection, "RagStore::new");
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self {
            cfg,
            client,
            embedder,
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Embeds chunks batch by batch and upserts them. The collection is
    /// created on first use with the width of the first vector.
    #[instrument(skip_all, fields(collection = %self.cfg.collection, chunks = chunks.len()))]
    async fn upsert_chunks(&self, chunks: &[IndexChunk]) -> Result<usize, RagError> {
        let mut total = 0usize;
        let mut vector_size: Option<usize> = None;

        for batch in chunks.chunks(self.cfg.upsert_batch.max(1)) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;

            let size = match vector_size {
                Some(s) => s,
                None => {
                    let got = vectors.first().map(Vec::len).unwrap_or(0);
                    let size = self.cfg.embedding_dim.unwrap_or(got);
                    if got != size {
                        return Err(RagError::VectorSizeMismatch { got, want: size });
                    }
                    self.client
                        .ensure_collection(&VectorSpace {
                            size,
                            distance: self.cfg.distance,
                        })
                        .await?;
                    vector_size = Some(size);
                    size
                }
            };

            let points = ingest::build_points(batch, vectors, size)?;
            total += self.client.upsert_points(points).await?;
            debug!(total, "batch upserted");
        }

        info!(total, "chunks stored");
        Ok(total)
    }
}

impl VectorIndex for RagStore {
    fn upsert<'a>(&'a self, chunks: &'a [IndexChunk]) -> IndexFuture<'a, usize> {
        Box::pin(self.upsert_chunks(chunks))
    }

    fn query<'a>(&'a self, text: &'a str, k: u64) -> IndexFuture<'a, Vec<RagHit>> {
        Box::pin(retrieve::rag_context(
            &self.cfg,
            &self.client,
            text,
            k,
            self.embedder.as_ref(),
        ))
    }
}
