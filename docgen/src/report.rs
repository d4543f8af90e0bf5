//! Per-method documentation report and its Markdown rendering.

use std::fmt::Write as _;

use ai_llm_service::llm::TextGenerator;
use code_indexer::MethodRecord;
use rag_store::{Progress, VectorIndex};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::cfg::{DocgenConfig, FailurePolicy};
use crate::error::DocgenError;
use crate::prompt::{compose_documentation_prompt, compose_grounded_documentation_prompt};
use crate::usage::{RetrievedContext, USAGE_TOP_K, UsageRetriever};

/// One method's entry in the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub method_name: String,
    pub use_case_text: String,
    pub documentation_text: String,
    /// Method source, rendered as a java block when present.
    pub source: Option<String>,
}

/// Sections in method declaration order. Same-named methods are kept apart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DocumentationReport {
    pub sections: Vec<ReportSection>,
}

impl DocumentationReport {
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders every section; an empty report renders as an empty string.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for s in &self.sections {
            let _ = write!(out, "### Method {}\n\n", s.method_name);
            let _ = write!(out, "#### Use cases\n\n{}\n\n", s.use_case_text.trim());
            let _ = write!(out, "#### Information\n\n{}\n\n", s.documentation_text.trim());
            if let Some(src) = &s.source {
                let _ = write!(out, "```java\n{}\n```\n\n", src.trim_end());
            }
        }
        out
    }
}

/// Collaborators a report needs, constructed by the caller.
#[derive(Clone, Copy)]
pub struct ReportDeps<'a> {
    pub index: &'a dyn VectorIndex,
    pub generator: &'a dyn TextGenerator,
    pub model: &'a str,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReportOptions {
    pub include_source: bool,
    pub grounded_docs: bool,
    pub failure_policy: FailurePolicy,
}

impl From<&DocgenConfig> for ReportOptions {
    fn from(cfg: &DocgenConfig) -> Self {
        Self {
            include_source: cfg.include_source,
            grounded_docs: cfg.grounded_docs,
            failure_policy: cfg.failure_policy,
        }
    }
}

/// Documents `methods` one after another, in order.
///
/// Under [`FailurePolicy::Abort`] the first failing method aborts the report.
/// Under [`FailurePolicy::Placeholder`] it gets a section describing the error.
/// Cancellation is checked before each method and also drops the request in flight.
///
/// # Errors
/// [`DocgenError::Cancelled`] when `cancel` fires; otherwise the first
/// retrieval or generation error under the abort policy.
#[instrument(skip_all, fields(methods = methods.len(), model = deps.model))]
pub async fn build_report(
    methods: &[MethodRecord],
    deps: ReportDeps<'_>,
    opts: ReportOptions,
    progress: &dyn Progress,
    cancel: &CancellationToken,
) -> Result<DocumentationReport, DocgenError> {
    progress.set_total(methods.len() as u64);
    let mut report = DocumentationReport::default();

    for method in methods {
        if cancel.is_cancelled() {
            return Err(DocgenError::Cancelled);
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DocgenError::Cancelled),
            r = document_method(method, deps, opts) => r,
        };

        let section = match outcome {
            Ok(section) => section,
            Err(e) if opts.failure_policy == FailurePolicy::Placeholder => {
                warn!(method = %method.method_name, error = %e, "method failed; writing placeholder");
                placeholder_section(method, &e, opts)
            }
            Err(e) => return Err(e),
        };

        report.sections.push(section);
        progress.step(&method.method_name);
    }

    progress.finish("documentation ready");
    info!(sections = report.len(), "report built");
    Ok(report)
}

async fn document_method(
    method: &MethodRecord,
    deps: ReportDeps<'_>,
    opts: ReportOptions,
) -> Result<ReportSection, DocgenError> {
    let use_cases = UsageRetriever::new(deps.index)
        .use_cases(&method.method_name, &method.class_name, deps.generator, deps.model)
        .await?;

    let prompt = if opts.grounded_docs {
        let hits = deps.index.query(&method.body, USAGE_TOP_K).await?;
        if hits.is_empty() {
            compose_documentation_prompt(method)
        } else {
            let ctx = RetrievedContext::new(&method.method_name, hits);
            compose_grounded_documentation_prompt(method, &ctx.joined())
        }
    } else {
        compose_documentation_prompt(method)
    };

    let documentation = deps.generator.generate(&prompt, deps.model).await?;

    Ok(ReportSection {
        method_name: method.method_name.clone(),
        use_case_text: use_cases.text().to_string(),
        documentation_text: documentation.trim().to_string(),
        source: opts.include_source.then(|| method.body.clone()),
    })
}

fn placeholder_section(method: &MethodRecord, err: &DocgenError, opts: ReportOptions) -> ReportSection {
    let text = format!("_Generation failed: {err}_");
    ReportSection {
        method_name: method.method_name.clone(),
        use_case_text: text.clone(),
        documentation_text: text,
        source: opts.include_source.then(|| method.body.clone()),
    }
}
