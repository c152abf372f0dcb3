use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use docqa_core::chunker::Chunker;
use docqa_core::config::PipelineConfig;
use docqa_core::traits::TextExtractor;
use docqa_hybrid::{Collaborators, Pipeline};
use docqa_models::{
    ExtractiveGenerator, HashEmbedder, PdftotextExtractor, PlainTextExtractor, TermOverlapScorer,
};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ask|chunks> [args...]", prog);
        eprintln!("  ask <file> \"<question>\"   index the file and answer the question");
        eprintln!("  chunks <file>             show how the file would be chunked");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn extractor_for(path: &Path) -> Arc<dyn TextExtractor> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("pdf") => Arc::new(PdftotextExtractor),
        _ => Arc::new(PlainTextExtractor),
    }
}

fn doc_id_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PipelineConfig::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ask" => {
            let path = args.first().map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: docqa ask <file> \"<question>\"");
                std::process::exit(1);
            });
            let question = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: docqa ask <file> \"<question>\"");
                std::process::exit(1);
            });
            let data = std::fs::read(&path)?;

            let collaborators = Collaborators {
                extractor: extractor_for(&path),
                embedder: Arc::new(HashEmbedder::new(config.models.embedding_dim)),
                scorer: Arc::new(TermOverlapScorer),
                generator: Arc::new(ExtractiveGenerator),
            };
            let pipeline = Pipeline::new(config, collaborators)?;

            let doc_id = doc_id_for(&path);
            match pipeline.index(&doc_id, &data).await {
                Ok(summary) => println!("Indexed {} ({} chunks)", summary.doc_id, summary.chunks),
                Err(e) => {
                    eprintln!("error [{}]: {}", e.stage(), e);
                    std::process::exit(1);
                }
            }
            match pipeline.query(&question).await {
                Ok(answer) => println!("{}", answer),
                Err(e) => {
                    eprintln!("error [{}]: {}", e.stage(), e);
                    std::process::exit(1);
                }
            }
        }
        "chunks" => {
            let path = args.first().map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: docqa chunks <file>");
                std::process::exit(1);
            });
            let data = std::fs::read(&path)?;
            let text = extractor_for(&path).extract(&data).await?;
            let chunker = Chunker::new(config.chunking.max_size, config.chunking.overlap);
            let chunks = chunker.chunk(&text, &doc_id_for(&path));
            println!(
                "{} chunks (max_size={}, overlap={})",
                chunks.len(),
                config.chunking.max_size,
                config.chunking.overlap
            );
            for chunk in &chunks {
                println!("  {}  {} chars", chunk.id, chunk.content.chars().count());
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
