//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// One Java file handed to the indexer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the project root.
    pub path: String,
    pub text: String,
}

/// A character window of a source file, the unit of embedding and storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexChunk {
    /// SHA-256 over path, order and offsets; stable across runs.
    pub id: String,
    pub path: String,
    pub order: usize,
    pub start_char: usize,
    pub end_char: usize,
    pub text: String,
    pub content_sha256: String,
}

/// A single retrieval hit with score, text and source path.
#[derive(Clone, Debug, Serialize)]
pub struct RagHit {
    pub score: f32,
    pub text: String,
    pub path: Option<String>,
}

/// Outcome of one project indexing run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    pub files: usize,
    pub chunks: usize,
    pub upserted: usize,
}
