use docqa_core::chunker::Chunker;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn tail(s: &str, n: usize) -> String {
    let len = char_len(s);
    s.chars().skip(len.saturating_sub(n)).collect()
}

fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Concatenating the chunks minus each chunk's overlap seed must
/// reconstruct the original text exactly.
fn assert_reconstructs(text: &str, chunks: &[String], overlap: usize) {
    let mut rebuilt = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            rebuilt.push_str(chunk);
        } else {
            rebuilt.push_str(&chunk.chars().skip(overlap).collect::<String>());
        }
    }
    assert_eq!(rebuilt, text);
}

#[test]
fn empty_input_yields_no_chunks() {
    let chunker = Chunker::new(500, 50);
    assert!(chunker.split("").is_empty());
    assert!(chunker.chunk("", "doc").is_empty());
}

#[test]
fn short_document_yields_single_chunk_without_overlap() {
    let chunker = Chunker::new(500, 50);
    let text = "A short note that easily fits in one chunk.";
    let chunks = chunker.split(text);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], text);
}

#[test]
fn split_is_deterministic() {
    let chunker = Chunker::new(120, 20);
    let text = "First paragraph with some sentences. Another sentence here!\n\n\
                Second paragraph follows, and it keeps going with more words \
                than a single chunk can hold. A third sentence? Certainly.\n\
                A trailing line without a paragraph break at the end.";
    let first = chunker.split(text);
    let second = chunker.split(text);
    assert_eq!(first, second);
    assert!(first.len() > 1);
}

#[test]
fn chunk_size_bound_holds() {
    let chunker = Chunker::new(80, 16);
    let text = "Words repeat over and over again in this document. ".repeat(30);
    let chunks = chunker.split(&text);
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(
            char_len(chunk) <= 80,
            "chunk of {} chars exceeds max_size",
            char_len(chunk)
        );
    }
    assert_reconstructs(&text, &chunks, 16);
}

#[test]
fn overlap_prefix_matches_previous_suffix() {
    let chunker = Chunker::new(100, 25);
    let text = "Sentence one lives here. Sentence two follows it. ".repeat(12);
    let chunks = chunker.split(&text);
    assert!(chunks.len() > 2);
    for pair in chunks.windows(2) {
        assert_eq!(tail(&pair[0], 25), head(&pair[1], 25));
    }
}

#[test]
fn one_paragraph_1200_chars_gives_three_bounded_chunks() {
    let text = "word ".repeat(240);
    assert_eq!(char_len(&text), 1200);
    let chunker = Chunker::new(500, 50);
    let chunks = chunker.split(&text);

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(char_len(chunk) <= 500);
    }
    for pair in chunks.windows(2) {
        assert_eq!(tail(&pair[0], 50), head(&pair[1], 50));
    }
    assert_reconstructs(&text, &chunks, 50);
}

#[test]
fn paragraph_breaks_take_priority() {
    let para1 = "a".repeat(400);
    let para2 = "b".repeat(400);
    let text = format!("{}\n\n{}", para1, para2);
    let chunker = Chunker::new(500, 50);
    let chunks = chunker.split(&text);

    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].ends_with("\n\n"));
    assert!(chunks[0].starts_with('a'));
    assert!(chunks[1].ends_with('b'));
}

#[test]
fn separator_free_text_falls_back_to_char_slices() {
    let text = "x".repeat(1200);
    let chunker = Chunker::new(500, 50);
    let chunks = chunker.split(&text);

    for chunk in &chunks {
        assert!(char_len(chunk) <= 500);
    }
    assert_reconstructs(&text, &chunks, 50);
}

#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let text = "überlänge ".repeat(100);
    let chunker = Chunker::new(64, 8);
    let chunks = chunker.split(&text);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(char_len(chunk) <= 64);
    }
    assert_reconstructs(&text, &chunks, 8);
}

#[test]
fn chunk_assembles_ids_and_ordinals() {
    let chunker = Chunker::new(100, 10);
    let text = "Sentence one is here. Sentence two is here. ".repeat(8);
    let chunks = chunker.chunk(&text, "report.txt");

    assert!(chunks.len() > 1);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
        assert_eq!(chunk.id, format!("report.txt:{}", i));
        assert_eq!(chunk.doc_id, "report.txt");
        assert_eq!(chunk.total_chunks, chunks.len());
    }
}
