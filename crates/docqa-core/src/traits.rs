//! Contracts for the external model collaborators.
//!
//! All four are blocking-on-IO calls from the pipeline's point of view, so
//! they are async and the pipeline wraps each invocation in a bounded
//! timeout. Implementations return `anyhow::Result`; the pipeline maps
//! failures into the stage-tagged [`crate::PipelineError`] taxonomy.

use async_trait::async_trait;

/// Turns a raw document payload into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: &[u8]) -> anyhow::Result<String>;
}

/// Maps text to a fixed-dimension, L2-normalized vector.
///
/// Called batched once per index build and once per query. Every returned
/// vector must have exactly `dim()` components.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Cross-encoding relevance model: scores (query, passage) pairs jointly.
/// Higher is more relevant. Returns one score per passage, in order.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    async fn score_batch(&self, query: &str, passages: &[String]) -> anyhow::Result<Vec<f32>>;
}

/// Produces the final answer from the question and the reranked supporting
/// texts. Prompt construction and output formatting live behind this seam.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str, contexts: &[String]) -> anyhow::Result<String>;
}
