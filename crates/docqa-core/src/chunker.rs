//! Recursive text chunking.
//!
//! Splits extracted document text into bounded, overlapping chunks by
//! applying boundary separators in priority order: paragraph breaks, line
//! breaks, sentence punctuation, whitespace, then raw character slicing.
//! Pieces keep their separator attached, so concatenating the pieces
//! reconstructs the input and every chunk is an exact substring of the
//! source (plus the overlap seed carried over from its predecessor).
//!
//! Splitting is fully deterministic: the same `(text, max_size, overlap)`
//! always yields the same chunk sequence. All sizes are in characters and
//! slicing never lands inside a multi-byte character.

use crate::types::DocumentChunk;

/// Boundary separators, highest priority first. The empty-string fallback
/// (raw character slicing) is implicit.
const SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "! ", "? ", " "];

#[derive(Debug, Clone)]
pub struct Chunker {
    max_size: usize,
    overlap: usize,
}

impl Chunker {
    /// `overlap` must be smaller than `max_size`; config validation
    /// enforces this before a chunker is built.
    pub fn new(max_size: usize, overlap: usize) -> Self {
        debug_assert!(max_size > 0);
        debug_assert!(overlap < max_size);
        Self { max_size, overlap }
    }

    /// Split `text` into chunk contents.
    ///
    /// Empty input yields no chunks; input no longer than `max_size` yields
    /// exactly one chunk with no overlap applied. Otherwise every chunk is
    /// at most `max_size` characters and every chunk after the first starts
    /// with the trailing `overlap` characters of its predecessor.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.max_size {
            return vec![text.to_string()];
        }

        // Pieces are bounded to max_size - overlap so that seeding a chunk
        // with the overlap never pushes it past max_size.
        let budget = (self.max_size - self.overlap).max(1);
        let pieces = split_pieces(text, &SEPARATORS, budget);

        let mut chunks: Vec<String> = Vec::new();
        let mut cur = String::new();
        let mut cur_len = 0usize;
        for piece in pieces {
            let piece_len = char_len(&piece);
            if cur_len + piece_len > self.max_size {
                let seed = tail_chars(&cur, self.overlap).to_string();
                chunks.push(std::mem::take(&mut cur));
                cur_len = char_len(&seed);
                cur = seed;
            }
            cur.push_str(&piece);
            cur_len += piece_len;
        }
        if !cur.is_empty() {
            chunks.push(cur);
        }
        chunks
    }

    /// Split `text` and wrap the results as [`DocumentChunk`]s for `doc_id`.
    pub fn chunk(&self, text: &str, doc_id: &str) -> Vec<DocumentChunk> {
        let contents = self.split(text);
        let total_chunks = contents.len();
        contents
            .into_iter()
            .enumerate()
            .map(|(chunk_index, content)| DocumentChunk {
                id: format!("{}:{}", doc_id, chunk_index),
                doc_id: doc_id.to_string(),
                content,
                chunk_index,
                total_chunks,
            })
            .collect()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

/// Recursively split `text` into pieces no longer than `budget` characters,
/// trying each separator in priority order and falling back to character
/// slicing when none applies. Separators stay attached to the piece they
/// terminate.
fn split_pieces(text: &str, separators: &[&str], budget: usize) -> Vec<String> {
    if char_len(text) <= budget {
        return vec![text.to_string()];
    }
    let Some((sep, rest)) = separators.split_first() else {
        return char_slices(text, budget);
    };
    if !text.contains(sep) {
        return split_pieces(text, rest, budget);
    }
    let mut pieces = Vec::new();
    for part in text.split_inclusive(sep) {
        if char_len(part) <= budget {
            pieces.push(part.to_string());
        } else {
            pieces.extend(split_pieces(part, rest, budget));
        }
    }
    pieces
}

/// Character-level fallback for separator-free runs: slices of exactly
/// `budget` characters (the last one possibly shorter).
fn char_slices(text: &str, budget: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;
    for ch in text.chars() {
        if cur_len == budget {
            out.push(std::mem::take(&mut cur));
            cur_len = 0;
        }
        cur.push(ch);
        cur_len += 1;
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The last `n` characters of `s` (the whole string if it is shorter).
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let start = s
        .char_indices()
        .rev()
        .nth(n - 1)
        .map_or(0, |(byte_index, _)| byte_index);
    &s[start..]
}
