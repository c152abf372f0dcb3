use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::Value;
use tantivy::{doc, Index, IndexReader, TantivyDocument};

use docqa_core::types::{ChunkId, DocumentChunk, SearchHit, SourceKind};

use crate::tantivy_utils::{build_schema, register_tokenizer};

/// BM25 index over one document's chunks, held entirely in RAM.
///
/// Building is a one-shot operation; a new document gets a new index.
pub struct LexicalIndex {
    index: Index,
    reader: IndexReader,
    id_field: tantivy::schema::Field,
    text_field: tantivy::schema::Field,
    ordinals: HashMap<ChunkId, usize>,
}

impl LexicalIndex {
    pub fn build(chunks: &[DocumentChunk]) -> Result<Self> {
        let schema = build_schema();
        let index = Index::create_in_ram(schema.clone());
        register_tokenizer(&index);
        let id_field = schema.get_field("id")?;
        let text_field = schema.get_field("text")?;

        let mut index_writer = index.writer(50_000_000)?;
        for c in chunks {
            let doc = doc!(
                id_field => c.id.clone(),
                text_field => c.content.clone(),
            );
            index_writer.add_document(doc)?;
        }
        index_writer.commit()?;

        let reader = index.reader()?;
        let ordinals = chunks
            .iter()
            .map(|c| (c.id.clone(), c.chunk_index))
            .collect();
        tracing::debug!(chunks = chunks.len(), "built lexical index");
        Ok(Self { index, reader, id_field, text_field, ordinals })
    }

    /// Top-`k` chunks by BM25 score, highest first, score ties broken by
    /// chunk ordinal. Returns fewer than `k` hits when fewer chunks share a
    /// term with the query; a query with no indexable tokens matches
    /// nothing.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let searcher = self.reader.searcher();
        let query_parser = QueryParser::for_index(&self.index, vec![self.text_field]);
        // Lenient parsing: free-text questions may contain characters that
        // are operators in the query grammar.
        let (parsed, _errors) = query_parser.parse_query_lenient(query);
        let top_docs = searcher.search(&parsed, &TopDocs::with_limit(k))?;

        let mut hits = Vec::new();
        for (score, addr) in top_docs {
            let doc: TantivyDocument = searcher.doc(addr)?;
            let id = doc
                .get_first(self.id_field)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("search hit is missing its stored chunk id"))?;
            let ordinal = self
                .ordinals
                .get(&id)
                .copied()
                .ok_or_else(|| anyhow!("search hit {id} has no ordinal entry"))?;
            hits.push(SearchHit { id, ordinal, score, source: SourceKind::Text });
        }
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });
        Ok(hits)
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}
