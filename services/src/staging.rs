//! Scratch copies of a project directory.
//!
//! Indexing works on a private copy so concurrent runs never observe each
//! other's files. The copy lives in a [`tempfile::TempDir`] owned by
//! [`StagingDir`]; dropping it removes the directory on every exit path,
//! including `?` returns and panics.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

pub type Result<T> = std::result::Result<T, StagingError>;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A copied directory tree that is deleted when dropped.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
    files: usize,
}

impl StagingDir {
    /// Copies every regular file under `src` into a fresh temp directory,
    /// keeping relative paths. Symlinks are not followed.
    #[instrument(skip_all, fields(src = %src.display()))]
    pub fn copy_from(src: &Path) -> Result<Self> {
        if !src.is_dir() {
            return Err(StagingError::NotADirectory(src.to_path_buf()));
        }

        let dir = tempfile::Builder::new().prefix("docgen-staging-").tempdir()?;
        let mut files = 0usize;

        for entry in WalkDir::new(src).follow_links(false) {
            let entry = entry?;
            let rel = match entry.path().strip_prefix(src) {
                Ok(r) if !r.as_os_str().is_empty() => r,
                _ => continue,
            };
            let target = dir.path().join(rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else if entry.file_type().is_file() {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)?;
                files += 1;
            }
        }

        info!(files, staging = %dir.path().display(), "project staged");
        Ok(Self { dir, files })
    }

    /// [`StagingDir::copy_from`] on the blocking pool.
    pub async fn copy_from_async(src: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::copy_from(&src)).await?
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Number of regular files copied.
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// Removes the directory now and reports failures, instead of the silent drop.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to remove staging dir");
            StagingError::Io(e)
        })?;
        debug!(path = %path.display(), "staging dir removed");
        Ok(())
    }
}
