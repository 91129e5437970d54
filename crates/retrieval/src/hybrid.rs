use crate::error::{Result, RetrievalError};
use crate::similarity::similarity_search;
use passage_doc_chunker::DocChunk;
use passage_vector_store::{FlatIndex, RecordStore};
use std::collections::HashSet;

/// Merge semantic retrieval with an externally produced keyword-match list.
///
/// Semantic results come first in their own order, then keyword-only
/// matches in input order; a chunk appearing on both sides (same content)
/// is kept once. The merged list is truncated to `top_k`. One side being
/// empty is not an error: the output degrades to whichever side has
/// results, and is empty only when both are.
///
/// The keyword list is produced outside this crate by whatever lexical
/// matcher the caller runs; it is trusted to carry compatible metadata.
pub fn hybrid_search(
    query: &[f32],
    keyword_matches: &[DocChunk],
    index: &FlatIndex,
    store: &RecordStore,
    top_k: usize,
) -> Result<Vec<DocChunk>> {
    if top_k == 0 {
        return Err(RetrievalError::invalid_argument("top_k must be positive"));
    }

    let semantic = similarity_search(query, index, store, top_k)?;
    log::debug!(
        "Hybrid search: {} semantic + {} keyword candidates",
        semantic.len(),
        keyword_matches.len()
    );

    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged: Vec<DocChunk> = Vec::new();
    for chunk in semantic.iter().chain(keyword_matches.iter()) {
        if seen.insert(chunk.content.as_str()) {
            merged.push(chunk.clone());
        }
        if merged.len() == top_k {
            break;
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_doc_chunker::ChunkMetadata;
    use pretty_assertions::assert_eq;

    fn chunk(source: &str, idx: usize, text: &str) -> DocChunk {
        DocChunk::new(text.to_string(), ChunkMetadata::new(source, idx))
    }

    fn corpus() -> (FlatIndex, RecordStore) {
        let embeddings = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![5.0, 5.0]];
        let chunks = vec![
            chunk("a.txt", 0, "origin"),
            chunk("a.txt", 1, "near"),
            chunk("a.txt", 2, "far"),
        ];
        let index = FlatIndex::build(&embeddings).unwrap();
        let store = RecordStore::build(chunks, embeddings).unwrap();
        (index, store)
    }

    #[test]
    fn semantic_results_come_first_then_unique_keyword_matches() {
        let (index, store) = corpus();
        let keywords = vec![chunk("k.txt", 0, "lexical hit")];

        let merged = hybrid_search(&[0.0, 0.0], &keywords, &index, &store, 3).unwrap();
        let contents: Vec<&str> = merged.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["origin", "near", "lexical hit"]);
    }

    #[test]
    fn chunks_on_both_sides_are_kept_once() {
        let (index, store) = corpus();
        // Same content as the nearest semantic hit, different provenance
        let keywords = vec![chunk("k.txt", 7, "origin"), chunk("k.txt", 8, "other")];

        let merged = hybrid_search(&[0.0, 0.0], &keywords, &index, &store, 10).unwrap();
        let contents: Vec<&str> = merged.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["origin", "near", "far", "other"]);
    }

    #[test]
    fn duplicate_keyword_input_is_idempotent() {
        let (index, store) = corpus();
        let twice = vec![chunk("k.txt", 0, "repeat"), chunk("k.txt", 0, "repeat")];

        let merged = hybrid_search(&[0.0, 0.0], &twice, &index, &store, 10).unwrap();
        let repeats = merged.iter().filter(|c| c.content == "repeat").count();
        assert_eq!(repeats, 1);
    }

    #[test]
    fn output_is_truncated_to_top_k() {
        let (index, store) = corpus();
        let keywords = vec![chunk("k.txt", 0, "extra one"), chunk("k.txt", 1, "extra two")];

        let merged = hybrid_search(&[0.0, 0.0], &keywords, &index, &store, 2).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn degrades_to_keyword_side_when_store_is_empty() {
        let (index, _) = corpus();
        let empty = RecordStore::build(vec![], vec![]).unwrap();
        let keywords = vec![chunk("k.txt", 0, "only hit")];

        let merged = hybrid_search(&[0.0, 0.0], &keywords, &index, &empty, 5).unwrap();
        let contents: Vec<&str> = merged.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["only hit"]);
    }

    #[test]
    fn both_sides_empty_yields_empty_not_error() {
        let (index, _) = corpus();
        let empty = RecordStore::build(vec![], vec![]).unwrap();
        let merged = hybrid_search(&[0.0, 0.0], &[], &index, &empty, 5).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let (index, store) = corpus();
        let err = hybrid_search(&[0.0, 0.0], &[], &index, &store, 0).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidArgument(_)));
    }
}
