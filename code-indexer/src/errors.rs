use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tree-sitter language error")]
    TreeSitterLanguage,

    /// The parser returned no tree at all.
    #[error("tree-sitter parse error")]
    TreeSitterParse,

    /// Source is not valid Java; position of the first error node (0-based).
    #[error("java syntax error at {row}:{column} near `{near}`")]
    Parse {
        row: usize,
        column: usize,
        near: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
