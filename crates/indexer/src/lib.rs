//! # Passage Indexer
//!
//! One-shot build pipeline for a retrieval corpus:
//!
//! ```text
//! documents dir ──load──> Document[]
//!                ──split─> DocChunk[]
//!                ──embed─> Vec<f32>[]
//!                ──build─> RecordStore + FlatIndex
//!                ──persist─> out dir (index.bin + records.json)
//! ```
//!
//! The build runs to completion before any query session starts; there is
//! no incremental update path. Re-indexing a changed corpus means running
//! the full pipeline again over the same output directory.

mod error;
mod indexer;
mod stats;

pub use error::{IndexerError, Result};
pub use indexer::CorpusIndexer;
pub use stats::IndexStats;
