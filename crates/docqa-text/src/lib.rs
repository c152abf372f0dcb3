//! docqa-text
//!
//! Tantivy-based lexical (BM25) indexing and search over document chunks.
//! The index lives in RAM and is rebuilt wholesale for every indexed
//! document.

pub mod index;
pub mod tantivy_utils;

pub use index::LexicalIndex;
