//! Method extraction over a parsed Java tree.
//!
//! A single explicit depth-first walk in document order. Only two node kinds
//! matter; everything else is just descended into.

use tree_sitter::{Node, Tree};

use crate::errors::{Error, Result};
use crate::types::{MethodRecord, ParseResult, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    ClassDeclaration,
    MethodDeclaration,
    Other,
}

impl NodeKind {
    fn of(node: &Node<'_>) -> Self {
        match node.kind() {
            "class_declaration" => NodeKind::ClassDeclaration,
            "method_declaration" => NodeKind::MethodDeclaration,
            _ => NodeKind::Other,
        }
    }
}

/// Method parts collected before the owning class name is known.
struct PendingMethod {
    name: String,
    declaration: String,
    span: Span,
}

/// Collect every method declaration in document order.
///
/// The class name applied to all records is the last top-level
/// `class_declaration`; nested classes never rename it. Method bodies are not
/// descended into, so anonymous and local classes contribute no methods.
pub fn extract_methods(tree: &Tree, code: &str) -> Result<ParseResult> {
    let root = tree.root_node();
    if root.has_error() {
        return Err(first_syntax_error(root, code));
    }

    let mut class_name = String::new();
    let mut pending: Vec<PendingMethod> = Vec::new();

    let mut stack: Vec<Node> = vec![root];
    while let Some(node) = stack.pop() {
        match NodeKind::of(&node) {
            NodeKind::ClassDeclaration => {
                if is_top_level(&node) {
                    if let Some(name) = node.child_by_field_name("name") {
                        class_name = text(code, name).to_string();
                    }
                }
            }
            NodeKind::MethodDeclaration => {
                if let Some(name) = node.child_by_field_name("name") {
                    pending.push(PendingMethod {
                        name: text(code, name).to_string(),
                        declaration: declaration(node, code),
                        span: Span::from_node(&node),
                    });
                }
                continue;
            }
            NodeKind::Other => {}
        }

        // Reverse so the next pop is the first child.
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    let methods = pending
        .into_iter()
        .map(|m| MethodRecord {
            method_name: m.name,
            class_name: class_name.clone(),
            declaration: m.declaration,
            body: code[m.span.start_byte..m.span.end_byte].to_string(),
            span: m.span,
        })
        .collect();

    Ok(ParseResult {
        class_name,
        methods,
    })
}

fn is_top_level(node: &Node<'_>) -> bool {
    node.parent().is_none_or(|p| p.kind() == "program")
}

/// Text from the start of the method up to its body brace.
/// Body-less methods (abstract, interface) drop the trailing `;`.
fn declaration(node: Node<'_>, code: &str) -> String {
    match node.child_by_field_name("body") {
        Some(body) => code[node.start_byte()..body.start_byte()].trim_end().to_string(),
        None => text(code, node).trim_end().trim_end_matches(';').trim_end().to_string(),
    }
}

fn first_syntax_error(root: Node<'_>, code: &str) -> Error {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let near = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                text(code, node).chars().take(40).collect()
            };
            return Error::Parse {
                row: pos.row,
                column: pos.column,
                near,
            };
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node
            .children(&mut cursor)
            .filter(|c| c.has_error() || c.is_missing())
            .collect();
        stack.extend(children.into_iter().rev());
    }

    let pos = root.start_position();
    Error::Parse {
        row: pos.row,
        column: pos.column,
        near: String::new(),
    }
}

#[inline]
fn text<'a>(code: &'a str, node: Node<'_>) -> &'a str {
    &code[node.byte_range()]
}
