use serde::{Deserialize, Serialize};

/// Absolute byte and (row,col) span inside the file.
///
/// Byte offsets are the ground truth; rows/cols are 0-based display hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Span {
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        let s = node.start_position();
        let e = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_row: s.row,
            start_col: s.column,
            end_row: e.row,
            end_col: e.column,
        }
    }
}

/// One method extracted from a Java source file.
///
/// `body` is the whole method (modifiers, signature and braces) exactly as it
/// appears in the file, i.e. `source[span.start_byte..span.end_byte]`.
/// `declaration` is the same text cut before the opening body brace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub method_name: String,
    pub class_name: String,
    pub declaration: String,
    pub body: String,
    pub span: Span,
}

/// Methods of one file in declaration order. Overloads are kept as separate records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Name of the last class declaration seen, empty if the file has none.
    pub class_name: String,
    pub methods: Vec<MethodRecord>,
}

impl ParseResult {
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodRecord> {
        self.methods.iter()
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = &'a MethodRecord;
    type IntoIter = std::slice::Iter<'a, MethodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}
