//! Java method documentation on top of the index and the model client.
//!
//! - [`usage`] asks the index who calls a method and gates the model on an exact call match
//! - [`prompt`] holds the documentation and usage templates
//! - [`report`] assembles per-method sections into Markdown
//! - [`generate_documentation_file`] and [`index_project_dir`] are the two end-to-end operations
//!
//! Clients are built by the caller and passed in; nothing here is global.

mod cfg;
mod error;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod usage;

#[cfg(test)]
mod testing;

pub use cfg::{DocgenConfig, FailurePolicy};
pub use error::DocgenError;
pub use pipeline::{GeneratedDoc, generate_documentation_file, index_project_dir};
pub use prompt::{
    NO_USE_CASES, compose_documentation_prompt, compose_grounded_documentation_prompt,
    compose_usage_prompt,
};
pub use report::{DocumentationReport, ReportDeps, ReportOptions, ReportSection, build_report};
pub use usage::{RetrievedContext, USAGE_TOP_K, UsageRetriever, UseCases};

pub use rag_store::{IndicatifProgress, NoopProgress, Progress, reporter};
pub use tokio_util::sync::CancellationToken;
