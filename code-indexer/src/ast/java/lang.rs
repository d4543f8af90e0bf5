//! Language hook for the Java grammar.

use tree_sitter::Language;

/// The `tree-sitter-java` crate exposes `LANGUAGE` convertible into `tree_sitter::Language`.
#[inline]
pub fn language() -> Language {
    tree_sitter_java::LANGUAGE.into()
}
