//! The pipeline state machine owning the single active document.
//!
//! State is `Empty` or `Indexed`; all chunks and both indexes are reachable
//! only through it. `index` holds the write guard for the whole rebuild and
//! empties the slot first, so concurrent queries see either the complete
//! old index or `NoDocumentLoaded` / the complete new one, never a partial
//! build. Every external model call is timeout-bounded and maps to its
//! stage's error variant.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::anyhow;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use docqa_core::chunker::Chunker;
use docqa_core::config::PipelineConfig;
use docqa_core::error::{PipelineError, Result};
use docqa_core::traits::{AnswerGenerator, Embedder, RelevanceScorer, TextExtractor};
use docqa_core::types::DocumentChunk;
use docqa_text::LexicalIndex;
use docqa_vector::VectorIndex;

use crate::fusion::{fuse, FusionWeights};
use crate::rerank::rerank;

/// The external model collaborators the pipeline delegates to.
pub struct Collaborators {
    pub extractor: Arc<dyn TextExtractor>,
    pub embedder: Arc<dyn Embedder>,
    pub scorer: Arc<dyn RelevanceScorer>,
    pub generator: Arc<dyn AnswerGenerator>,
}

struct ActiveIndex {
    doc_id: String,
    chunks: Vec<DocumentChunk>,
    lexical: LexicalIndex,
    vector: VectorIndex,
}

enum State {
    Empty,
    Indexed(ActiveIndex),
}

pub struct Pipeline {
    config: PipelineConfig,
    chunker: Chunker,
    collaborators: Collaborators,
    state: RwLock<State>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("chunker", &self.chunker)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub doc_id: String,
    pub chunks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineStatus {
    pub indexed: bool,
    pub doc_id: Option<String>,
    pub chunks: usize,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        if collaborators.embedder.dim() != config.models.embedding_dim {
            return Err(PipelineError::InvalidConfig(format!(
                "embedder dimension ({}) does not match models.embedding_dim ({})",
                collaborators.embedder.dim(),
                config.models.embedding_dim
            )));
        }
        let chunker = Chunker::new(config.chunking.max_size, config.chunking.overlap);
        Ok(Self {
            config,
            chunker,
            collaborators,
            state: RwLock::new(State::Empty),
        })
    }

    /// Extract, chunk, embed, and index one document, replacing whatever
    /// was indexed before. On any failure the pipeline is left `Empty`.
    pub async fn index(&self, doc_id: &str, data: &[u8]) -> Result<IndexSummary> {
        if doc_id.trim().is_empty() {
            return Err(PipelineError::EmptyInput("document id is empty"));
        }
        if data.is_empty() {
            return Err(PipelineError::EmptyInput("document payload is empty"));
        }

        let mut state = self.state.write().await;
        // Discard the previous index up front: a failed rebuild must leave
        // the pipeline empty, never half-built or stale.
        *state = State::Empty;

        let text = self
            .bounded(self.collaborators.extractor.extract(data))
            .await
            .map_err(|e| PipelineError::ExtractionFailed(format!("{e:#}")))?;
        if text.trim().is_empty() {
            return Err(PipelineError::ExtractionFailed(
                "no text extracted from document".to_string(),
            ));
        }

        let chunks = self.chunker.chunk(&text, doc_id);
        let contents: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self
            .bounded(self.collaborators.embedder.embed_batch(&contents))
            .await
            .map_err(|e| PipelineError::EmbeddingUnavailable(format!("{e:#}")))?;

        let lexical = LexicalIndex::build(&chunks).map_err(|e| {
            PipelineError::IndexBuildFailed(format!("lexical index build failed: {e:#}"))
        })?;
        let vector = VectorIndex::build(&chunks, &embeddings, self.collaborators.embedder.dim())
            .map_err(|e| PipelineError::EmbeddingUnavailable(format!("{e:#}")))?;

        info!(doc_id, chunks = chunks.len(), "document indexed");
        let summary = IndexSummary { doc_id: doc_id.to_string(), chunks: chunks.len() };
        *state = State::Indexed(ActiveIndex {
            doc_id: doc_id.to_string(),
            chunks,
            lexical,
            vector,
        });
        Ok(summary)
    }

    /// Answer `question` against the active document: retrieve from both
    /// indexes, fuse, rerank, and hand the shortlist to the generator.
    pub async fn query(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(PipelineError::EmptyInput("query text is empty"));
        }

        let state = self.state.read().await;
        let State::Indexed(active) = &*state else {
            return Err(PipelineError::NoDocumentLoaded);
        };

        let mut query_vecs = self
            .bounded(
                self.collaborators
                    .embedder
                    .embed_batch(&[question.to_string()]),
            )
            .await
            .map_err(|e| PipelineError::EmbeddingUnavailable(format!("{e:#}")))?;
        let query_vec = query_vecs.pop().ok_or_else(|| {
            PipelineError::EmbeddingUnavailable("embedder returned no vector for the query".to_string())
        })?;

        let k = self.config.retrieval.k;
        let lexical_hits = active.lexical.search(question, k).map_err(|e| {
            PipelineError::RetrievalUnavailable(format!("lexical search failed: {e:#}"))
        })?;
        let semantic_hits = active.vector.search(&query_vec, k).map_err(|e| {
            PipelineError::RetrievalUnavailable(format!("vector search failed: {e:#}"))
        })?;

        let weights = FusionWeights::new(
            self.config.retrieval.weight_lexical,
            self.config.retrieval.weight_semantic,
        );
        let candidates = fuse(&lexical_hits, &semantic_hits, weights);
        debug!(
            lexical = lexical_hits.len(),
            semantic = semantic_hits.len(),
            fused = candidates.len(),
            "retrieval complete"
        );

        let by_id: HashMap<&str, &DocumentChunk> =
            active.chunks.iter().map(|c| (c.id.as_str(), c)).collect();
        let fused_chunks: Vec<&DocumentChunk> = candidates
            .iter()
            .filter_map(|c| by_id.get(c.id.as_str()).copied())
            .collect();

        let shortlist = self
            .bounded(rerank(
                self.collaborators.scorer.as_ref(),
                question,
                &fused_chunks,
                self.config.retrieval.rerank_top_n,
            ))
            .await
            .map_err(|e| PipelineError::RelevanceUnavailable(format!("{e:#}")))?;

        // An empty shortlist still goes to the generator, which produces a
        // "no relevant content" answer rather than an error.
        let contexts: Vec<String> = shortlist.iter().map(|c| c.content.clone()).collect();
        let answer = self
            .bounded(self.collaborators.generator.generate(question, &contexts))
            .await
            .map_err(|e| PipelineError::GenerationFailed(format!("{e:#}")))?;
        Ok(answer)
    }

    /// Discard the active document and both indexes. Idempotent: clearing
    /// an already-empty pipeline is a no-op success.
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if matches!(&*state, State::Indexed(_)) {
            info!("cleared active document index");
        }
        *state = State::Empty;
        Ok(())
    }

    pub async fn status(&self) -> PipelineStatus {
        match &*self.state.read().await {
            State::Empty => PipelineStatus { indexed: false, doc_id: None, chunks: 0 },
            State::Indexed(active) => PipelineStatus {
                indexed: true,
                doc_id: Some(active.doc_id.clone()),
                chunks: active.chunks.len(),
            },
        }
    }

    /// Apply the configured bound to one external model call; expiry
    /// surfaces as an error instead of hanging the request.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = anyhow::Result<T>> + Send,
    ) -> anyhow::Result<T> {
        let timeout = self.config.model_timeout();
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!(
                "external model call timed out after {}s",
                timeout.as_secs()
            )),
        }
    }
}
