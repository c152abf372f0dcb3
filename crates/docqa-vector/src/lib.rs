//! docqa-vector
//!
//! In-memory dense vector index over chunk embeddings. Vectors are
//! L2-normalized by the embedding collaborator, so dot product equals
//! cosine similarity and an exact scan is the nearest-neighbor search.
//! The index is rebuilt wholesale for every indexed document.

use anyhow::{bail, Result};

use docqa_core::types::{ChunkId, DocumentChunk, SearchHit, SourceKind};

struct VectorEntry {
    id: ChunkId,
    ordinal: usize,
    vector: Vec<f32>,
}

pub struct VectorIndex {
    dim: usize,
    entries: Vec<VectorEntry>,
}

impl VectorIndex {
    /// Build from chunks and their embeddings, in matching order. Every
    /// embedding must have the same dimension.
    pub fn build(chunks: &[DocumentChunk], embeddings: &[Vec<f32>], dim: usize) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            bail!(
                "chunk count ({}) does not match embedding count ({})",
                chunks.len(),
                embeddings.len()
            );
        }
        if dim == 0 {
            bail!("embedding dimension must be positive");
        }
        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.iter().zip(embeddings) {
            if vector.len() != dim {
                bail!(
                    "embedding dimension mismatch for chunk {}: expected {}, got {}",
                    chunk.id,
                    dim,
                    vector.len()
                );
            }
            entries.push(VectorEntry {
                id: chunk.id.clone(),
                ordinal: chunk.chunk_index,
                vector: vector.clone(),
            });
        }
        tracing::debug!(chunks = entries.len(), dim, "built vector index");
        Ok(Self { dim, entries })
    }

    /// Top-`k` chunks by similarity to `query_vec`, highest first,
    /// similarity ties broken by chunk ordinal.
    pub fn search(&self, query_vec: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query_vec.len() != self.dim {
            bail!(
                "query embedding dimension mismatch: expected {}, got {}",
                self.dim,
                query_vec.len()
            );
        }
        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                id: entry.id.clone(),
                ordinal: entry.ordinal,
                score: dot(query_vec, &entry.vector),
                source: SourceKind::Vector,
            })
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });
        hits.truncate(k);
        Ok(hits)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
