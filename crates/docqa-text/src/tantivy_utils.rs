use tantivy::schema::{IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::Index;

pub const CHUNK_TOKENIZER: &str = "chunk_text";

/// Schema for the per-document chunk index: the chunk id (stored, raw) and
/// the chunk text (tokenized with frequencies and positions, not stored;
/// chunk contents stay with the pipeline's chunk table).
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _id_field = schema_builder.add_text_field("id", STRING | STORED);
    let text_field_indexing = TextFieldIndexing::default()
        .set_tokenizer(CHUNK_TOKENIZER)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default().set_indexing_options(text_field_indexing);
    let _text_field = schema_builder.add_text_field("text", text_options);
    schema_builder.build()
}

/// Lowercasing word tokenizer. No stemming and no stopword removal, so the
/// lexical signal stays a plain term-frequency match.
pub fn register_tokenizer(index: &Index) {
    let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build();
    index.tokenizers().register(CHUNK_TOKENIZER, tokenizer);
}
