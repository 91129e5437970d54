use crate::error::{Result, RetrievalError};
use passage_doc_chunker::DocChunk;
use passage_vector_store::{FlatIndex, RecordStore};

/// Plain nearest-neighbor retrieval: the `top_k` chunks closest to the
/// query vector, in ascending distance order.
///
/// This is the baseline the other strategies build on. An empty store
/// yields an empty result, not an error; `top_k == 0` fails with
/// `InvalidArgument`.
pub fn similarity_search(
    query: &[f32],
    index: &FlatIndex,
    store: &RecordStore,
    top_k: usize,
) -> Result<Vec<DocChunk>> {
    if top_k == 0 {
        return Err(RetrievalError::invalid_argument("top_k must be positive"));
    }
    if store.is_empty() {
        return Ok(Vec::new());
    }

    let hits = index.search(query, top_k)?;
    log::debug!("Similarity search: {} hits for top_k {top_k}", hits.len());

    hits.into_iter()
        .map(|(id, _)| Ok(store.get(id)?.chunk.clone()))
        .collect()
}
