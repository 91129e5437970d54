//! # Passage Retrieval
//!
//! Ranking strategies over a built vector corpus, and the session facade
//! that ties them to a query embedder.
//!
//! Three strategies share one shape: a query vector in, ranked chunks out,
//! with the store and index left untouched.
//!
//! - **Similarity**: exact nearest neighbors, ascending distance.
//! - **MMR**: diversity-aware re-ranking that trades relevance against
//!   redundancy among the already selected results.
//! - **Hybrid**: merges semantic results with an externally produced
//!   keyword-match list.
//!
//! [`Retriever`] is the intended entry point: open it once per session over
//! a persisted corpus directory, then issue any number of concurrent
//! queries against the loaded pair.

mod error;
mod hybrid;
mod mmr;
mod retriever;
mod similarity;

pub use error::{Result, RetrievalError};
pub use hybrid::hybrid_search;
pub use mmr::{mmr_search, MmrParams};
pub use retriever::{RetrievalStrategy, Retriever};
pub use similarity::similarity_search;
