//! Usage retrieval: find call sites of a method in the index and decide
//! whether they are trustworthy enough to ask the model about.

use ai_llm_service::llm::TextGenerator;
use rag_store::{RagError, RagHit, VectorIndex};
use tracing::{debug, instrument};

use crate::error::DocgenError;
use crate::prompt::{NO_USE_CASES, compose_usage_prompt};

/// Snippets requested per usage query.
pub const USAGE_TOP_K: u64 = 4;

/// Snippets returned for a usage query.
#[derive(Debug, Clone, Default)]
pub struct RetrievedContext {
    pub snippets: Vec<RagHit>,
    /// Some snippet contains `.<method>(`. Always false when `snippets` is empty.
    pub has_exact_match: bool,
}

impl RetrievedContext {
    /// Builds the context and derives `has_exact_match` for `method_name`.
    pub fn new(method_name: &str, snippets: Vec<RagHit>) -> Self {
        let pattern = call_pattern(method_name);
        let has_exact_match = !snippets.is_empty() && join_snippets(&snippets).contains(&pattern);
        Self {
            snippets,
            has_exact_match,
        }
    }

    /// Snippet texts separated by blank lines, in rank order.
    pub fn joined(&self) -> String {
        join_snippets(&self.snippets)
    }
}

/// Use-case text for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseCases {
    /// No retrieved snippet calls the method; the model was not asked.
    NoEvidence,
    Generated(String),
}

impl UseCases {
    pub fn text(&self) -> &str {
        match self {
            UseCases::NoEvidence => NO_USE_CASES,
            UseCases::Generated(text) => text,
        }
    }
}

/// Queries a [`VectorIndex`] for the call sites of a method.
pub struct UsageRetriever<'a> {
    index: &'a dyn VectorIndex,
}

impl<'a> UsageRetriever<'a> {
    pub fn new(index: &'a dyn VectorIndex) -> Self {
        Self { index }
    }

    /// Top [`USAGE_TOP_K`] snippets for a natural-language usage question.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, method_name: &str, class_name: &str) -> Result<RetrievedContext, RagError> {
        let query = usage_query(method_name, class_name);
        let hits = self.index.query(&query, USAGE_TOP_K).await?;
        let ctx = RetrievedContext::new(method_name, hits);
        debug!(
            snippets = ctx.snippets.len(),
            exact = ctx.has_exact_match,
            "usage context retrieved"
        );
        Ok(ctx)
    }

    /// Retrieves usage context and, only when a snippet really calls the
    /// method, asks the model to describe the call sites.
    pub async fn use_cases(
        &self,
        method_name: &str,
        class_name: &str,
        generator: &dyn TextGenerator,
        model: &str,
    ) -> Result<UseCases, DocgenError> {
        let ctx = self.retrieve(method_name, class_name).await?;
        describe_use_cases(method_name, &ctx, generator, model).await
    }
}

/// Turns retrieved context into use-case text. No model call without an exact match.
pub async fn describe_use_cases(
    method_name: &str,
    ctx: &RetrievedContext,
    generator: &dyn TextGenerator,
    model: &str,
) -> Result<UseCases, DocgenError> {
    if !ctx.has_exact_match {
        debug!(method = method_name, "no call site in retrieved context; skipping model");
        return Ok(UseCases::NoEvidence);
    }

    let prompt = compose_usage_prompt(method_name, &ctx.joined());
    let text = generator.generate(&prompt, model).await?;
    Ok(UseCases::Generated(text.trim().to_string()))
}

/// "In which methods is `Foo.bar()` called?"
pub fn usage_query(method_name: &str, class_name: &str) -> String {
    if class_name.is_empty() {
        format!("In which methods is `{method_name}()` called?")
    } else {
        format!("In which methods is `{class_name}.{method_name}()` called?")
    }
}

fn call_pattern(method_name: &str) -> String {
    format!(".{method_name}(")
}

fn join_snippets(snippets: &[RagHit]) -> String {
    snippets
        .iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingGenerator, FixedIndex};

    #[test]
    fn exact_match_needs_the_call_pattern() {
        let hits = FixedIndex::hits(&["int y = this.barrel(1);", "bar();"]);
        assert!(!RetrievedContext::new("bar", hits).has_exact_match);

        let hits = FixedIndex::hits(&["int y = foo.bar(1);"]);
        assert!(RetrievedContext::new("bar", hits).has_exact_match);

        assert!(!RetrievedContext::new("bar", Vec::new()).has_exact_match);
    }

    #[test]
    fn query_names_class_and_method() {
        assert_eq!(usage_query("bar", "Foo"), "In which methods is `Foo.bar()` called?");
        assert_eq!(usage_query("bar", ""), "In which methods is `bar()` called?");
    }

    #[tokio::test]
    async fn no_exact_match_never_calls_the_model() {
        let index = FixedIndex::new(&["class Other { void run() { helper(); } }"]);
        let generator = CountingGenerator::new("should not be used");

        let out = UsageRetriever::new(&index)
            .use_cases("bar", "Foo", &generator, "m")
            .await
            .unwrap();

        assert_eq!(out, UseCases::NoEvidence);
        assert_eq!(out.text(), NO_USE_CASES);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn empty_index_never_calls_the_model() {
        let index = FixedIndex::new(&[]);
        let generator = CountingGenerator::new("x");

        let out = UsageRetriever::new(&index)
            .use_cases("bar", "Foo", &generator, "m")
            .await
            .unwrap();

        assert_eq!(out, UseCases::NoEvidence);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn exact_match_sends_snippet_and_name_to_the_model() {
        let snippet = "class Baz { int q(Foo f) { return f.bar(); } }";
        let index = FixedIndex::new(&[snippet]);
        let generator = CountingGenerator::new("  Use case 1: Baz.q\nDescription: reads bar  ");

        let out = UsageRetriever::new(&index)
            .use_cases("bar", "Foo", &generator, "gemma:2b")
            .await
            .unwrap();

        assert_eq!(out.text(), "Use case 1: Baz.q\nDescription: reads bar");
        assert_eq!(generator.calls(), 1);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains(snippet));
        assert!(prompt.contains("bar"));
        assert_eq!(generator.last_model().as_deref(), Some("gemma:2b"));
        assert_eq!(index.queries(), ["In which methods is `Foo.bar()` called?"]);
    }
}
