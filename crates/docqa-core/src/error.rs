use thiserror::Error;

/// Stage-tagged pipeline failures. Each external collaborator and each
/// retrieval stage surfaces its own variant; nothing degrades silently.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("no document loaded")]
    NoDocumentLoaded,

    #[error("document extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("embedding model unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("index build failed: {0}")]
    IndexBuildFailed(String),

    #[error("retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("relevance model unavailable: {0}")]
    RelevanceUnavailable(String),

    #[error("answer generation failed: {0}")]
    GenerationFailed(String),
}

impl PipelineError {
    /// Short label for the stage that failed, for structured reporting.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "config",
            Self::EmptyInput(_) => "input",
            Self::NoDocumentLoaded => "state",
            Self::ExtractionFailed(_) => "extract",
            Self::EmbeddingUnavailable(_) => "embed",
            Self::IndexBuildFailed(_) => "index",
            Self::RetrievalUnavailable(_) => "retrieve",
            Self::RelevanceUnavailable(_) => "rerank",
            Self::GenerationFailed(_) => "generate",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
