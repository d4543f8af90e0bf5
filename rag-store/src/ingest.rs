//! Project indexing: files → character chunks → one upsert.

use std::collections::HashMap;

use qdrant_client::qdrant::{PointId, PointStruct, Value as QValue, value};
use services::uuid::stable_uuid;
use tracing::{info, instrument};

use crate::chunking::{ChunkingConfig, chunk_text};
use crate::errors::RagError;
use crate::index::VectorIndex;
use crate::progress::Progress;
use crate::record::{IndexChunk, IndexReport, SourceFile};

/// Chunks every file and upserts all chunks with a single [`VectorIndex::upsert`] call.
///
/// Running twice over identical files with the same config produces identical
/// chunks and ids, so the second run replaces rather than duplicates.
///
/// # Errors
/// `RagError::Config` for a bad chunk window; whatever the index returns otherwise.
#[instrument(skip_all, fields(files = files.len(), chunk_size = chunking.chunk_size, overlap = chunking.overlap))]
pub async fn index_project(
    index: &dyn VectorIndex,
    files: &[SourceFile],
    chunking: &ChunkingConfig,
    progress: &dyn Progress,
) -> Result<IndexReport, RagError> {
    chunking.validate()?;
    progress.set_total(files.len() as u64);

    let mut chunks: Vec<IndexChunk> = Vec::new();
    for f in files {
        chunks.extend(chunk_text(&f.path, &f.text, chunking));
        progress.step(&f.path);
    }

    progress.message(&format!("embedding and upserting {} chunks", chunks.len()));
    let upserted = if chunks.is_empty() {
        0
    } else {
        index.upsert(&chunks).await?
    };
    progress.finish("indexing complete");

    let report = IndexReport {
        files: files.len(),
        chunks: chunks.len(),
        upserted,
    };
    info!(?report, "project indexed");
    Ok(report)
}

/// Builds Qdrant points for chunks and their vectors (same order, same length).
pub(crate) fn build_points(
    chunks: &[IndexChunk],
    vectors: Vec<Vec<f32>>,
    vector_size: usize,
) -> Result<Vec<PointStruct>, RagError> {
    if chunks.len() != vectors.len() {
        return Err(RagError::VectorSizeMismatch {
            got: vectors.len(),
            want: chunks.len(),
        });
    }

    let mut pts = Vec::with_capacity(chunks.len());
    for (c, vector) in chunks.iter().zip(vectors) {
        if vector.len() != vector_size {
            return Err(RagError::VectorSizeMismatch {
                got: vector.len(),
                want: vector_size,
            });
        }

        let mut payload: HashMap<String, QValue> = HashMap::new();
        payload.insert("text".into(), qstring(&c.text));
        payload.insert("path".into(), qstring(&c.path));
        payload.insert("chunk_id".into(), qstring(&c.id));
        payload.insert("content_sha256".into(), qstring(&c.content_sha256));
        payload.insert("order".into(), qint(c.order));
        payload.insert("start_char".into(), qint(c.start_char));
        payload.insert("end_char".into(), qint(c.end_char));

        let pid: PointId = stable_uuid(&c.id).to_string().into();
        pts.push(PointStruct::new(pid, vector, payload));
    }
    Ok(pts)
}

fn qstring(s: &str) -> QValue {
    QValue {
        kind: Some(value::Kind::StringValue(s.to_string())),
    }
}

fn qint(n: usize) -> QValue {
    QValue {
        kind: Some(value::Kind::IntegerValue(n as i64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexFuture;
    use crate::progress::NoopProgress;
    use crate::record::RagHit;
    use std::sync::Mutex;

    /// Records every upsert call.
    #[derive(Default)]
    struct RecordingIndex {
        calls: Mutex<Vec<Vec<IndexChunk>>>,
    }

    impl VectorIndex for RecordingIndex {
        fn upsert<'a>(&'a self, chunks: &'a [IndexChunk]) -> IndexFuture<'a, usize> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(chunks.to_vec());
                Ok(chunks.len())
            })
        }

        fn query<'a>(&'a self, _text: &'a str, _k: u64) -> IndexFuture<'a, Vec<RagHit>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    struct DownIndex;

    impl VectorIndex for DownIndex {
        fn upsert<'a>(&'a self, _chunks: &'a [IndexChunk]) -> IndexFuture<'a, usize> {
            Box::pin(async { Err(RagError::IndexUnavailable("connection refused".into())) })
        }

        fn query<'a>(&'a self, _text: &'a str, _k: u64) -> IndexFuture<'a, Vec<RagHit>> {
            Box::pin(async { Err(RagError::IndexUnavailable("connection refused".into())) })
        }
    }

    fn files() -> Vec<SourceFile> {
        vec![
            SourceFile {
                path: "src/Foo.java".into(),
                text: "class Foo { int bar() { return new Baz().qux(); } }".repeat(10),
            },
            SourceFile {
                path: "src/Baz.java".into(),
                text: "class Baz { int qux() { return 1; } }".into(),
            },
        ]
    }

    #[tokio::test]
    async fn one_upsert_call_per_run_and_runs_are_identical() {
        let index = RecordingIndex::default();
        let cfg = ChunkingConfig {
            chunk_size: 100,
            overlap: 20,
        };

        let first = index_project(&index, &files(), &cfg, &NoopProgress).await.unwrap();
        let second = index_project(&index, &files(), &cfg, &NoopProgress).await.unwrap();

        let calls = index.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(first, second);
        assert_eq!(first.files, 2);
        assert_eq!(first.chunks, calls[0].len());
        assert!(calls[0].iter().any(|c| c.path == "src/Baz.java"));
    }

    #[tokio::test]
    async fn no_files_means_no_upsert() {
        let index = RecordingIndex::default();
        let report = index_project(&index, &[], &ChunkingConfig::default(), &NoopProgress)
            .await
            .unwrap();

        assert_eq!(report, IndexReport::default());
        assert!(index.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_index_fails_the_run() {
        let err = index_project(&DownIndex, &files(), &ChunkingConfig::default(), &NoopProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::IndexUnavailable(_)));
    }

    #[test]
    fn points_carry_stable_ids_and_payload() {
        let chunks = chunk_text("A.java", "class A { void f() {} }", &ChunkingConfig::default());
        let pts = build_points(&chunks, vec![vec![0.5, 0.5]], 2).unwrap();
        let again = build_points(&chunks, vec![vec![0.5, 0.5]], 2).unwrap();

        assert_eq!(pts[0].id, again[0].id);
        assert!(pts[0].payload.contains_key("text"));
        assert!(pts[0].payload.contains_key("path"));

        let wrong = build_points(&chunks, vec![vec![0.5]], 2).unwrap_err();
        assert!(matches!(wrong, RagError::VectorSizeMismatch { got: 1, want: 2 }));
    }
}
