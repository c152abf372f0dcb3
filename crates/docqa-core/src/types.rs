//! Domain types shared by the lexical and semantic retrieval engines.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// A bounded, overlapping segment of one document's extracted text.
///
/// - `id`: unique chunk identifier (`"<doc_id>:<chunk_index>"`)
/// - `doc_id`: identity of the submitted document (e.g. the file name)
/// - `content`: the text payload, an exact substring of the source text
///   apart from the overlap seed carried over from the previous chunk
/// - `chunk_index`/`total_chunks`: position within the parent document
///
/// Chunks are created in one batch when a document is indexed and are
/// immutable until the whole batch is replaced or cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: ChunkId,
    pub doc_id: String,
    pub content: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// Indicates which engine produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Vector,
    Text,
}

/// The minimal surface returned by both retrieval engines.
///
/// `id` matches `DocumentChunk::id`. `score` is engine-specific but higher
/// is always better; scores from different engines are not comparable until
/// fused. `ordinal` is the chunk's document order, used to break score ties
/// deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: ChunkId,
    pub ordinal: usize,
    pub score: f32,
    pub source: SourceKind,
}

/// A fused retrieval candidate. Scores are comparable only within the
/// result set of a single query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: ChunkId,
    pub ordinal: usize,
    pub score: f32,
}
