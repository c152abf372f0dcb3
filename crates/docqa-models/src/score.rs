use async_trait::async_trait;
use std::collections::HashSet;

use docqa_core::traits::RelevanceScorer;

/// Relevance as the fraction of query terms present in the passage.
///
/// A crude but deterministic stand-in for a cross-encoder: it scores the
/// (query, passage) pair jointly rather than comparing embeddings.
pub struct TermOverlapScorer;

impl TermOverlapScorer {
    fn score_one(query_terms: &HashSet<String>, passage: &str) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }
        let passage_terms = tokenize(passage);
        let matched = query_terms.intersection(&passage_terms).count();
        matched as f32 / query_terms.len() as f32
    }
}

#[async_trait]
impl RelevanceScorer for TermOverlapScorer {
    async fn score_batch(&self, query: &str, passages: &[String]) -> anyhow::Result<Vec<f32>> {
        let query_terms = tokenize(query);
        Ok(passages
            .iter()
            .map(|p| Self::score_one(&query_terms, p))
            .collect())
    }
}

fn tokenize(input: &str) -> HashSet<String> {
    input
        .split_whitespace()
        .map(|term| {
            term.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|term| !term.is_empty())
        .collect()
}
