//! Public Java AST provider: parsing + method extraction.

use tree_sitter::{Parser, Tree};
use tracing::debug;

use super::extract::extract_methods;
use super::lang::language as java_language;
use crate::ast::interface::AstProvider;
use crate::errors::{Error, Result};
use crate::types::ParseResult;

/// Java AST provider (parse + extract).
pub struct JavaAst;

impl JavaAst {
    /// Parse source code into a Tree-sitter `Tree`.
    ///
    /// Errors:
    /// - `Error::TreeSitterLanguage` if language cannot be set;
    /// - `Error::TreeSitterParse` if parsing returns `None`.
    #[inline]
    fn parse(code: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&java_language())
            .map_err(|_| Error::TreeSitterLanguage)?;
        parser.parse(code, None).ok_or(Error::TreeSitterParse)
    }
}

impl AstProvider for JavaAst {
    fn parse_source(code: &str) -> Result<ParseResult> {
        if code.trim().is_empty() {
            return Ok(ParseResult::default());
        }

        let tree = Self::parse(code)?;
        let result = extract_methods(&tree, code)?;
        debug!(
            class = %result.class_name,
            methods = result.len(),
            "java source parsed"
        );
        Ok(result)
    }
}
