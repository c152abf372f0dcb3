use anyhow::bail;
use async_trait::async_trait;

use docqa_core::traits::RelevanceScorer;
use docqa_core::types::DocumentChunk;
use docqa_hybrid::rerank;

fn make_chunks(contents: &[&str]) -> Vec<DocumentChunk> {
    let total = contents.len();
    contents
        .iter()
        .enumerate()
        .map(|(i, content)| DocumentChunk {
            id: format!("doc:{}", i),
            doc_id: "doc".to_string(),
            content: (*content).to_string(),
            chunk_index: i,
            total_chunks: total,
        })
        .collect()
}

/// Scores each passage by its length, making the expected order obvious.
struct LengthScorer;

#[async_trait]
impl RelevanceScorer for LengthScorer {
    async fn score_batch(&self, _query: &str, passages: &[String]) -> anyhow::Result<Vec<f32>> {
        Ok(passages.iter().map(|p| p.len() as f32).collect())
    }
}

struct FailingScorer;

#[async_trait]
impl RelevanceScorer for FailingScorer {
    async fn score_batch(&self, _query: &str, _passages: &[String]) -> anyhow::Result<Vec<f32>> {
        bail!("relevance model offline")
    }
}

/// Proves the model is never invoked for an empty candidate list.
struct PanickingScorer;

#[async_trait]
impl RelevanceScorer for PanickingScorer {
    async fn score_batch(&self, _query: &str, _passages: &[String]) -> anyhow::Result<Vec<f32>> {
        panic!("scorer must not be called");
    }
}

#[tokio::test]
async fn reorders_by_model_score_and_truncates() {
    let chunks = make_chunks(&["short", "a rather longer passage", "medium text"]);
    let candidates: Vec<&DocumentChunk> = chunks.iter().collect();

    let shortlist = rerank(&LengthScorer, "query", &candidates, 2)
        .await
        .expect("rerank");
    assert_eq!(shortlist.len(), 2);
    assert_eq!(shortlist[0].content, "a rather longer passage");
    assert_eq!(shortlist[1].content, "medium text");
}

#[tokio::test]
async fn equal_scores_tie_break_by_chunk_order() {
    let chunks = make_chunks(&["aaaa", "bbbb", "cccc"]);
    let candidates: Vec<&DocumentChunk> = vec![&chunks[2], &chunks[0], &chunks[1]];

    let shortlist = rerank(&LengthScorer, "query", &candidates, 3)
        .await
        .expect("rerank");
    assert_eq!(shortlist[0].content, "aaaa");
    assert_eq!(shortlist[1].content, "bbbb");
    assert_eq!(shortlist[2].content, "cccc");
}

#[tokio::test]
async fn scorer_failure_fails_the_stage() {
    let chunks = make_chunks(&["some passage"]);
    let candidates: Vec<&DocumentChunk> = chunks.iter().collect();
    assert!(rerank(&FailingScorer, "query", &candidates, 3).await.is_err());
}

#[tokio::test]
async fn empty_candidates_skip_the_model() {
    let shortlist = rerank(&PanickingScorer, "query", &[], 3)
        .await
        .expect("rerank");
    assert!(shortlist.is_empty());
}
