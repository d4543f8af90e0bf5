use std::io::IsTerminal;
use std::sync::Arc;

use ai_llm_service::{
    config::default_config::{config_embedding, config_generation},
    health_service::HealthService,
    llm::OllamaService,
};
use docgen::DocgenConfig;
use rag_store::{OllamaEmbedder, RagConfig, RagStore};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Model clients are built once at startup. The vector store is built per
/// request, so missing `QDRANT_*` settings only fail the routes that need them.
pub struct AppState {
    /// Client for documentation and usage generation.
    pub generator: Arc<OllamaService>,
    /// Client for chunk and query embeddings.
    pub embedder: Arc<OllamaService>,
    pub health: HealthService,
    pub docgen: DocgenConfig,
    /// Cancelled on shutdown; handlers derive child tokens from it.
    pub shutdown: CancellationToken,
    /// Stderr is a terminal, so long operations draw a progress bar.
    pub interactive: bool,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env(shutdown: CancellationToken) -> Result<Self, AppError> {
        let generator = OllamaService::new(config_generation()?)?;
        let embedder = OllamaService::new(config_embedding()?)?;
        let health = HealthService::new(None)?;
        let docgen = DocgenConfig::from_env()?;

        info!(
            model = generator.model(),
            embedding_model = embedder.model(),
            endpoint = %generator.config().endpoint,
            "model clients ready"
        );

        Ok(Self {
            generator: Arc::new(generator),
            embedder: Arc::new(embedder),
            health,
            docgen,
            shutdown,
            interactive: std::io::stderr().is_terminal(),
        })
    }

    /// Model used for generation: `DOCS_MODEL` if set, else `OLLAMA_MODEL`.
    pub fn model(&self) -> &str {
        self.docgen.model.as_deref().unwrap_or_else(|| self.generator.model())
    }

    /// Qdrant-backed index for one request.
    ///
    /// # Errors
    /// `MissingEnv` when `QDRANT_URL` or `QDRANT_API_KEY` is absent.
    pub fn rag_store(&self) -> Result<RagStore, AppError> {
        let cfg = RagConfig::from_env()?;
        let embedder = OllamaEmbedder::new(self.embedder.clone(), cfg.embedding_dim);
        Ok(RagStore::new(cfg, Arc::new(embedder))?)
    }
}
