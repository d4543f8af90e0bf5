//! In-memory fakes shared by the unit tests of this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ai_llm_service::AiLlmError;
use ai_llm_service::llm::{GenerateFuture, TextGenerator};
use rag_store::{IndexChunk, IndexFuture, RagError, RagHit, VectorIndex};

/// Index that returns the same snippets for every query and records what it saw.
#[derive(Default)]
pub(crate) struct FixedIndex {
    snippets: Vec<String>,
    queries: Mutex<Vec<String>>,
    stored: Mutex<Vec<IndexChunk>>,
}

impl FixedIndex {
    pub(crate) fn new(snippets: &[&str]) -> Self {
        Self {
            snippets: snippets.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn hits(snippets: &[&str]) -> Vec<RagHit> {
        snippets
            .iter()
            .enumerate()
            .map(|(i, s)| RagHit {
                score: 1.0 - i as f32 * 0.1,
                text: s.to_string(),
                path: None,
            })
            .collect()
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn stored(&self) -> Vec<IndexChunk> {
        self.stored.lock().unwrap().clone()
    }
}

impl VectorIndex for FixedIndex {
    fn upsert<'a>(&'a self, chunks: &'a [IndexChunk]) -> IndexFuture<'a, usize> {
        Box::pin(async move {
            let mut stored = self.stored.lock().unwrap();
            for c in chunks {
                stored.retain(|s| s.id != c.id);
                stored.push(c.clone());
            }
            Ok(chunks.len())
        })
    }

    fn query<'a>(&'a self, text: &'a str, k: u64) -> IndexFuture<'a, Vec<RagHit>> {
        Box::pin(async move {
            self.queries.lock().unwrap().push(text.to_string());
            let refs: Vec<&str> = self.snippets.iter().map(String::as_str).collect();
            Ok(Self::hits(&refs).into_iter().take(k as usize).collect())
        })
    }
}

/// Index whose every call fails as if Qdrant were down.
pub(crate) struct DownIndex;

impl VectorIndex for DownIndex {
    fn upsert<'a>(&'a self, _chunks: &'a [IndexChunk]) -> IndexFuture<'a, usize> {
        Box::pin(async { Err(RagError::IndexUnavailable("connection refused".into())) })
    }

    fn query<'a>(&'a self, _text: &'a str, _k: u64) -> IndexFuture<'a, Vec<RagHit>> {
        Box::pin(async { Err(RagError::IndexUnavailable("connection refused".into())) })
    }
}

/// Generator that answers with a fixed text and counts calls.
/// Prompts containing `fail_on` get a `ModelUnavailable` error instead.
pub(crate) struct CountingGenerator {
    reply: String,
    fail_on: Option<String>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String)>>,
}

impl CountingGenerator {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail_on: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub(crate) fn failing_on(reply: &str, needle: &str) -> Self {
        Self {
            fail_on: Some(needle.to_string()),
            ..Self::new(reply)
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().map(|(p, _)| p.clone())
    }

    pub(crate) fn last_model(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().map(|(_, m)| m.clone())
    }
}

impl TextGenerator for CountingGenerator {
    fn generate<'a>(&'a self, prompt: &'a str, model: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((prompt.to_string(), model.to_string()));
            match &self.fail_on {
                Some(needle) if prompt.contains(needle.as_str()) => Err(AiLlmError::ModelUnavailable {
                    url: "http://localhost:11434/api/generate".into(),
                    status: None,
                    reason: "connection refused".into(),
                }),
                _ => Ok(self.reply.clone()),
            }
        })
    }
}
