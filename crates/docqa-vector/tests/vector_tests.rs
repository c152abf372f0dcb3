use docqa_core::types::DocumentChunk;
use docqa_vector::VectorIndex;

fn make_chunks(n: usize) -> Vec<DocumentChunk> {
    (0..n)
        .map(|i| DocumentChunk {
            id: format!("doc:{}", i),
            doc_id: "doc".to_string(),
            content: format!("chunk {}", i),
            chunk_index: i,
            total_chunks: n,
        })
        .collect()
}

#[test]
fn nearest_vector_ranks_first() {
    let chunks = make_chunks(2);
    let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    let index = VectorIndex::build(&chunks, &embeddings, 2).expect("build");

    let hits = index.search(&[1.0, 0.0], 10).expect("search");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "doc:0");
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn truncates_to_k() {
    let chunks = make_chunks(4);
    let embeddings = vec![
        vec![1.0, 0.0],
        vec![0.9, 0.1],
        vec![0.5, 0.5],
        vec![0.0, 1.0],
    ];
    let index = VectorIndex::build(&chunks, &embeddings, 2).expect("build");
    let hits = index.search(&[1.0, 0.0], 2).expect("search");
    assert_eq!(hits.len(), 2);
}

#[test]
fn equal_similarity_breaks_ties_by_ordinal() {
    let chunks = make_chunks(3);
    let embeddings = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 0.0]];
    let index = VectorIndex::build(&chunks, &embeddings, 2).expect("build");

    let hits = index.search(&[1.0, 0.0], 10).expect("search");
    assert_eq!(hits[0].id, "doc:1");
    assert_eq!(hits[1].id, "doc:2");
}

#[test]
fn build_rejects_mismatched_embedding_dimension() {
    let chunks = make_chunks(2);
    let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0, 0.0]];
    assert!(VectorIndex::build(&chunks, &embeddings, 2).is_err());
}

#[test]
fn build_rejects_mismatched_counts() {
    let chunks = make_chunks(2);
    let embeddings = vec![vec![1.0, 0.0]];
    assert!(VectorIndex::build(&chunks, &embeddings, 2).is_err());
}

#[test]
fn query_dimension_mismatch_is_an_error() {
    let chunks = make_chunks(1);
    let embeddings = vec![vec![1.0, 0.0]];
    let index = VectorIndex::build(&chunks, &embeddings, 2).expect("build");
    assert!(index.search(&[1.0, 0.0, 0.0], 5).is_err());
}

#[test]
fn empty_index_searches_empty() {
    let index = VectorIndex::build(&[], &[], 2).expect("build");
    assert!(index.is_empty());
    assert!(index.search(&[1.0, 0.0], 5).expect("search").is_empty());
}
