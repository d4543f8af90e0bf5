//! Java source parsing for documentation generation.
//!
//! - [`parse_java`] turns one file's text into an ordered [`ParseResult`]
//! - [`parse_java_file`] does the same for a path
//! - [`scan_java_files`] lists the `.java` files of a project tree

pub mod ast;
pub mod errors;
pub mod types;
mod util;

use std::path::{Path, PathBuf};

use crate::ast::interface::AstProvider;
pub use ast::java::JavaAst;
pub use errors::{Error, Result};
pub use types::{MethodRecord, ParseResult, Span};
pub use util::fs_scan::DEFAULT_EXCLUDES;

/// Parse Java source text into its methods, in declaration order.
///
/// # Errors
/// [`Error::Parse`] if the text is not valid Java.
pub fn parse_java(code: &str) -> Result<ParseResult> {
    JavaAst::parse_source(code)
}

/// Read and parse one Java file.
pub fn parse_java_file(path: &Path) -> Result<ParseResult> {
    JavaAst::parse_file(path)
}

/// Sorted list of `.java` files under `root`, skipping [`DEFAULT_EXCLUDES`].
pub fn scan_java_files(root: &Path) -> Vec<PathBuf> {
    util::fs_scan::scan_java_files(root, DEFAULT_EXCLUDES)
}
