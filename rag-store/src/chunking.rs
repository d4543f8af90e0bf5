//! Character-window chunking of source files.
//!
//! Windows are `chunk_size` characters long and start every
//! `chunk_size - overlap` characters. Boundaries ignore Java syntax, so a
//! method can be split across two chunks and retrieved partially.
//! Offsets count `char`s, never bytes, so multi-byte text is never cut
//! inside a code point.

use sha2::{Digest, Sha256};

use crate::errors::RagError;
use crate::record::IndexChunk;

/// Window size and overlap, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 500,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<(), RagError> {
        if self.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be > 0".into()));
        }
        if self.overlap >= self.chunk_size {
            return Err(RagError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    #[inline]
    fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap).max(1)
    }
}

/// Split one file into overlapping chunks.
///
/// Output is a pure function of `(path, text, cfg)`. Whitespace-only windows
/// are dropped; `order` counts emitted chunks only.
pub fn chunk_text(path: &str, text: &str, cfg: &ChunkingConfig) -> Vec<IndexChunk> {
    // Byte offset of every char boundary, plus the end.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = bounds.len() - 1;

    let mut out = Vec::new();
    if total_chars == 0 {
        return out;
    }

    let size = cfg.chunk_size.max(1);
    let step = cfg.step();
    let mut start = 0usize;
    loop {
        let end = (start + size).min(total_chars);
        let piece = &text[bounds[start]..bounds[end]];

        if !piece.trim().is_empty() {
            let order = out.len();
            out.push(IndexChunk {
                id: chunk_id(path, order, start, end),
                path: path.to_string(),
                order,
                start_char: start,
                end_char: end,
                text: piece.to_string(),
                content_sha256: sha256_hex(piece.as_bytes()),
            });
        }

        if end == total_chars {
            break;
        }
        start += step;
    }
    out
}

fn chunk_id(path: &str, order: usize, start: usize, end: usize) -> String {
    sha256_hex(format!("{path}#{order}:{start}-{end}").as_bytes())
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(chunk_size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig { chunk_size, overlap }
    }

    #[test]
    fn windows_overlap_by_the_configured_amount() {
        let text: String = ('a'..='z').cycle().take(25).collect();
        let chunks = chunk_text("A.java", &text, &cfg(10, 4));

        let spans: Vec<(usize, usize)> = chunks.iter().map(|c| (c.start_char, c.end_char)).collect();
        assert_eq!(spans, [(0, 10), (6, 16), (12, 22), (18, 25)]);
        assert_eq!(&chunks[0].text[6..], &chunks[1].text[..4]);
    }

    #[test]
    fn zero_overlap_tiles_the_file() {
        let text = "x".repeat(20);
        let chunks = chunk_text("A.java", &text, &cfg(10, 0));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.iter().map(|c| c.text.as_str()).collect::<String>(), text);
    }

    #[test]
    fn short_file_is_one_chunk_and_empty_file_is_none() {
        assert_eq!(chunk_text("A.java", "class A {}", &cfg(1000, 500)).len(), 1);
        assert!(chunk_text("A.java", "", &cfg(1000, 500)).is_empty());
        assert!(chunk_text("A.java", "   \n  ", &cfg(1000, 500)).is_empty());
    }

    #[test]
    fn same_input_gives_identical_chunks_and_ids() {
        let text = "class A {\n  void f() { g(); }\n}\n".repeat(50);
        let a = chunk_text("src/A.java", &text, &cfg(120, 30));
        let b = chunk_text("src/A.java", &text, &cfg(120, 30));
        assert_eq!(a, b);

        let other_path = chunk_text("src/B.java", &text, &cfg(120, 30));
        assert_ne!(a[0].id, other_path[0].id);
        assert_eq!(a[0].content_sha256, other_path[0].content_sha256);
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        let text = "// комментарий ✓\nclass Ж {}\n";
        let chunks = chunk_text("Ж.java", text, &cfg(7, 2));
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 7));
        assert!(chunks.last().unwrap().text.ends_with("{}\n"));
    }

    #[test]
    fn validate_rejects_degenerate_windows() {
        assert!(cfg(0, 0).validate().is_err());
        assert!(cfg(100, 100).validate().is_err());
        assert!(cfg(900, 0).validate().is_ok());
    }
}
