use crate::errors::Result;
use crate::types::ParseResult;
use std::path::Path;

pub trait AstProvider {
    /// Parse source text and return its methods in declaration order.
    fn parse_source(code: &str) -> Result<ParseResult>;

    /// Read and parse a single file.
    fn parse_file(path: &Path) -> Result<ParseResult> {
        let code = std::fs::read_to_string(path)?;
        Self::parse_source(&code)
    }
}
