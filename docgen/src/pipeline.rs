//! End-to-end operations: document one Java file, index one project.

use std::path::{Path, PathBuf};

use code_indexer::{parse_java, scan_java_files};
use rag_store::{ChunkingConfig, IndexReport, Progress, SourceFile, VectorIndex, index_project};
use serde::Serialize;
use services::staging::StagingDir;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::cfg::DocgenConfig;
use crate::error::DocgenError;
use crate::report::{ReportDeps, ReportOptions, build_report};

/// Where a report was written and how many sections it has.
#[derive(Clone, Debug, Serialize)]
pub struct GeneratedDoc {
    pub output_path: PathBuf,
    pub sections: usize,
}

/// Parses `file`, documents each method and writes the Markdown report.
///
/// The report goes to `workspace_root/<output_file>` when a root is given,
/// otherwise next to `file`. Nothing is written if any step fails.
#[instrument(skip_all, fields(file = %file.display()))]
pub async fn generate_documentation_file(
    file: &Path,
    workspace_root: Option<&Path>,
    deps: ReportDeps<'_>,
    cfg: &DocgenConfig,
    progress: &dyn Progress,
    cancel: &CancellationToken,
) -> Result<GeneratedDoc, DocgenError> {
    let text = tokio::fs::read_to_string(file).await?;
    let parsed = parse_java(&text)?;
    info!(methods = parsed.len(), class = %parsed.class_name, "file parsed");

    let report = build_report(&parsed.methods, deps, ReportOptions::from(cfg), progress, cancel).await?;

    let out_dir = match workspace_root {
        Some(root) => root.to_path_buf(),
        None => file.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let output_path = out_dir.join(&cfg.output_file);
    tokio::fs::write(&output_path, report.to_markdown()).await?;

    info!(path = %output_path.display(), sections = report.len(), "documentation written");
    Ok(GeneratedDoc {
        output_path,
        sections: report.len(),
    })
}

/// Stages a copy of `dir`, reads its `.java` files and indexes them.
///
/// File paths in the index are relative to `dir`. The staging copy is
/// removed whether indexing succeeds or fails.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn index_project_dir(
    dir: &Path,
    index: &dyn VectorIndex,
    chunking: &ChunkingConfig,
    progress: &dyn Progress,
) -> Result<IndexReport, DocgenError> {
    let staging = StagingDir::copy_from_async(dir.to_path_buf()).await?;

    let files = read_java_sources(staging.path()).await?;
    debug!(staged = staging.file_count(), java = files.len(), "java sources read");
    let report = index_project(index, &files, chunking, progress).await?;

    staging.close()?;
    Ok(report)
}

async fn read_java_sources(root: &Path) -> Result<Vec<SourceFile>, DocgenError> {
    let mut files = Vec::new();
    for path in scan_java_files(root) {
        let text = tokio::fs::read_to_string(&path).await?;
        let rel = path.strip_prefix(root).unwrap_or(&path);
        files.push(SourceFile {
            path: rel.to_string_lossy().replace('\\', "/"),
            text,
        });
    }
    Ok(files)
}
