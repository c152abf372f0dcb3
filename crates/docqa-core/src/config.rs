//! Configuration loading and validation.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars, then extracts typed sections with serde defaults. `validate`
//! enforces the invariants the retrieval pipeline depends on (fusion
//! weights summing to 1, overlap strictly smaller than the chunk size).

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::{PipelineError, Result};

const WEIGHT_SUM_TOLERANCE: f32 = 1e-6;

/// Chunk boundary policy. Sizes are in characters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_size: 500, overlap: 50 }
    }
}

/// Retrieval depth, fusion weights, and the rerank shortlist size.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Results requested from each engine before fusion.
    pub k: usize,
    pub weight_lexical: f32,
    pub weight_semantic: f32,
    /// Shortlist length after reranking, handed to the answer generator.
    pub rerank_top_n: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { k: 6, weight_lexical: 0.45, weight_semantic: 0.55, rerank_top_n: 4 }
    }
}

/// External model collaborator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub embedding_dim: usize,
    /// Bound applied to every external model call.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { embedding_dim: 256, timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub models: ModelConfig,
}

impl PipelineConfig {
    /// Load from `config.toml`, the `RUST_ENV`-selected overlay, and `APP_*`
    /// environment variables, then validate.
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "chunking.max_size must be positive".to_string(),
            ));
        }
        if self.chunking.overlap >= self.chunking.max_size {
            return Err(PipelineError::InvalidConfig(format!(
                "chunking.overlap ({}) must be smaller than chunking.max_size ({})",
                self.chunking.overlap, self.chunking.max_size
            )));
        }
        if self.retrieval.k == 0 {
            return Err(PipelineError::InvalidConfig(
                "retrieval.k must be positive".to_string(),
            ));
        }
        if self.retrieval.rerank_top_n == 0 {
            return Err(PipelineError::InvalidConfig(
                "retrieval.rerank_top_n must be positive".to_string(),
            ));
        }
        let (w_lex, w_sem) = (self.retrieval.weight_lexical, self.retrieval.weight_semantic);
        if w_lex < 0.0 || w_sem < 0.0 {
            return Err(PipelineError::InvalidConfig(
                "fusion weights must be non-negative".to_string(),
            ));
        }
        if (w_lex + w_sem - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PipelineError::InvalidConfig(format!(
                "fusion weights must sum to 1 (got {} + {})",
                w_lex, w_sem
            )));
        }
        if self.models.embedding_dim == 0 {
            return Err(PipelineError::InvalidConfig(
                "models.embedding_dim must be positive".to_string(),
            ));
        }
        if self.models.timeout_secs == 0 {
            return Err(PipelineError::InvalidConfig(
                "models.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.models.timeout_secs)
    }
}
