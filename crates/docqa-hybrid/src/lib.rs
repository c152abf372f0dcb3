//! docqa-hybrid
//!
//! Hybrid retrieval over the lexical and semantic indexes: weighted score
//! fusion, cross-encoder reranking, and the pipeline state machine that
//! owns the single active document.

pub mod fusion;
pub mod pipeline;
pub mod rerank;

pub use fusion::{fuse, FusionWeights};
pub use pipeline::{Collaborators, IndexSummary, Pipeline, PipelineStatus};
pub use rerank::rerank;
