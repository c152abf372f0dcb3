//! Cross-encoder reranking of the fused candidate shortlist.
//!
//! Fusion scores from heterogeneous signals are not precise enough for
//! final ranking, so the shortlist is re-scored against the literal query
//! by the relevance model. A scorer failure fails the stage; falling back
//! to the fusion order would mask degraded answer quality.

use anyhow::{bail, Result};

use docqa_core::traits::RelevanceScorer;
use docqa_core::types::DocumentChunk;

/// Re-score `candidates` (in fused order) against `query` and return at
/// most `top_n` chunks, highest relevance first, score ties broken by
/// chunk ordinal. An empty candidate list short-circuits without calling
/// the model.
pub async fn rerank(
    scorer: &dyn RelevanceScorer,
    query: &str,
    candidates: &[&DocumentChunk],
    top_n: usize,
) -> Result<Vec<DocumentChunk>> {
    if candidates.is_empty() || top_n == 0 {
        return Ok(Vec::new());
    }
    let passages: Vec<String> = candidates.iter().map(|c| c.content.clone()).collect();
    let scores = scorer.score_batch(query, &passages).await?;
    if scores.len() != candidates.len() {
        bail!(
            "relevance model returned {} scores for {} candidates",
            scores.len(),
            candidates.len()
        );
    }

    let mut ranked: Vec<(f32, &DocumentChunk)> =
        scores.into_iter().zip(candidates.iter().copied()).collect();
    ranked.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| a.1.chunk_index.cmp(&b.1.chunk_index))
    });
    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(_, chunk)| chunk.clone())
        .collect())
}
