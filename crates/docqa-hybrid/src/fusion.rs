//! Weighted fusion of the two ranked retrieval lists.
//!
//! Raw BM25 scores and cosine similarities live on different scales, so
//! each list is min-max normalized to [0, 1] before the weighted
//! combination. A chunk retrieved by only one engine keeps that engine's
//! contribution and gets zero from the other.

use std::collections::HashMap;

use docqa_core::types::{ChunkId, RankedCandidate, SearchHit};

/// Fixed per-pipeline fusion weights. Must sum to 1; config validation
/// enforces this before a pipeline is built.
#[derive(Debug, Clone, Copy)]
pub struct FusionWeights {
    pub lexical: f32,
    pub semantic: f32,
}

impl FusionWeights {
    pub fn new(lexical: f32, semantic: f32) -> Self {
        debug_assert!(lexical >= 0.0 && semantic >= 0.0);
        debug_assert!((lexical + semantic - 1.0).abs() < 1e-5);
        Self { lexical, semantic }
    }
}

/// Merge the two ranked lists into one candidate set, deduplicated by chunk
/// id, sorted by fused score descending with ties broken by chunk ordinal.
pub fn fuse(
    lexical: &[SearchHit],
    semantic: &[SearchHit],
    weights: FusionWeights,
) -> Vec<RankedCandidate> {
    let mut combined: HashMap<ChunkId, (usize, f32)> = HashMap::new();

    for (hit, normalized) in lexical.iter().zip(normalize(lexical)) {
        let entry = combined.entry(hit.id.clone()).or_insert((hit.ordinal, 0.0));
        entry.1 += weights.lexical * normalized;
    }
    for (hit, normalized) in semantic.iter().zip(normalize(semantic)) {
        let entry = combined.entry(hit.id.clone()).or_insert((hit.ordinal, 0.0));
        entry.1 += weights.semantic * normalized;
    }

    let mut candidates: Vec<RankedCandidate> = combined
        .into_iter()
        .map(|(id, (ordinal, score))| RankedCandidate { id, ordinal, score })
        .collect();
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.ordinal.cmp(&b.ordinal))
    });
    candidates
}

/// Min-max normalize one list's scores to [0, 1]. A single-element or
/// constant list normalizes to 1.0 so a sole hit is not zeroed out.
fn normalize(hits: &[SearchHit]) -> Vec<f32> {
    if hits.is_empty() {
        return Vec::new();
    }
    let max = hits.iter().map(|h| h.score).fold(f32::NEG_INFINITY, f32::max);
    let min = hits.iter().map(|h| h.score).fold(f32::INFINITY, f32::min);
    let range = max - min;
    if range <= f32::EPSILON {
        return vec![1.0; hits.len()];
    }
    hits.iter().map(|h| (h.score - min) / range).collect()
}
