use crate::error::{Result, RetrievalError};
use passage_doc_chunker::DocChunk;
use passage_vector_store::{FlatIndex, RecordStore};
use serde::{Deserialize, Serialize};

/// Tuning knobs for maximal-marginal-relevance retrieval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MmrParams {
    /// Trade-off in `[0, 1]`: 1 is pure relevance, 0 is pure diversity
    pub lambda: f32,

    /// Candidate pool size as a multiple of `top_k`
    pub overfetch_factor: usize,
}

impl Default for MmrParams {
    fn default() -> Self {
        Self {
            lambda: 0.5,
            overfetch_factor: 5,
        }
    }
}

/// Diversity-aware retrieval by maximal marginal relevance.
///
/// A candidate pool of `top_k * overfetch_factor` nearest neighbors is
/// drawn first, then `top_k` results are selected one at a time, each step
/// taking the candidate that maximizes
///
/// ```text
/// lambda * relevance(query, c) - (1 - lambda) * max_sim(c, selected)
/// ```
///
/// Relevance and pairwise similarity are both negative squared Euclidean
/// distance in the embedding space. With `lambda = 1` the redundancy term
/// vanishes and the output reproduces plain similarity ordering, ties
/// included; with `lambda = 0` every pick after the first maximizes
/// distance from the already selected results.
pub fn mmr_search(
    query: &[f32],
    index: &FlatIndex,
    store: &RecordStore,
    top_k: usize,
    params: &MmrParams,
) -> Result<Vec<DocChunk>> {
    if top_k == 0 {
        return Err(RetrievalError::invalid_argument("top_k must be positive"));
    }
    if !params.lambda.is_finite() || !(0.0..=1.0).contains(&params.lambda) {
        return Err(RetrievalError::invalid_argument(format!(
            "lambda must be within [0, 1], got {}",
            params.lambda
        )));
    }
    if params.overfetch_factor == 0 {
        return Err(RetrievalError::invalid_argument(
            "overfetch_factor must be positive",
        ));
    }
    if store.is_empty() {
        return Ok(Vec::new());
    }

    let pool = top_k.saturating_mul(params.overfetch_factor);
    // Candidates arrive ordered by ascending distance, ties by id; keeping
    // that order makes every later tie-break deterministic.
    let mut remaining: Vec<(usize, f32)> = index
        .search(query, pool)?
        .into_iter()
        .map(|(id, distance)| (id, -distance))
        .collect();
    log::debug!(
        "MMR: pool of {} candidates for top_k {top_k}, lambda {}",
        remaining.len(),
        params.lambda
    );

    let lambda = params.lambda;
    let mut selected: Vec<usize> = Vec::with_capacity(top_k);
    while selected.len() < top_k && !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (pos, &(id, relevance)) in remaining.iter().enumerate() {
            let score = if selected.is_empty() {
                lambda * relevance
            } else {
                let redundancy = selected
                    .iter()
                    .filter_map(|&chosen| index.distance(id, chosen))
                    .map(|distance| -distance)
                    .fold(f32::NEG_INFINITY, f32::max);
                lambda * relevance - (1.0 - lambda) * redundancy
            };
            // Strictly greater, so equal scores keep the earlier candidate
            if score > best_score {
                best_score = score;
                best_pos = pos;
            }
        }
        let (id, _) = remaining.remove(best_pos);
        selected.push(id);
    }

    selected
        .into_iter()
        .map(|id| Ok(store.get(id)?.chunk.clone()))
        .collect()
}
