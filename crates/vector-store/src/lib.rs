//! # Passage Vector Store
//!
//! Vector storage and exact nearest-neighbor search for text chunks.
//!
//! ## Architecture
//!
//! ```text
//! DocChunk[]
//!     │
//!     ├──> Embedder (stub or HTTP collaborator)
//!     │      └─> Vec<f32> per chunk, uniform dimension
//!     │
//!     ├──> RecordStore
//!     │      └─> VectorRecord { id, embedding, chunk }
//!     │
//!     └──> FlatIndex
//!            └─> exact squared-L2 top-k search
//! ```
//!
//! A built corpus persists as two co-located files: `index.bin`, an opaque
//! binary blob owned by [`FlatIndex`], and `records.json`, the ordered chunk
//! sequence owned by [`RecordStore`]. Position `i` in both files refers to
//! the same logical record, which is why the pair is always persisted and
//! reloaded together.
//!
//! Both structures are immutable once built. Rebuilding after a corpus
//! change means re-running the full build, never appending in place.
//!
//! ## Example
//!
//! ```no_run
//! use passage_doc_chunker::{ChunkMetadata, DocChunk};
//! use passage_vector_store::{FlatIndex, RecordStore};
//!
//! # fn main() -> passage_vector_store::Result<()> {
//! let chunks = vec![DocChunk::new("hello".into(), ChunkMetadata::new("a.txt", 0))];
//! let embeddings = vec![vec![0.1, 0.2, 0.3]];
//!
//! let index = FlatIndex::build(&embeddings)?;
//! let store = RecordStore::build(chunks, embeddings)?;
//!
//! for (id, distance) in index.search(&[0.1, 0.2, 0.3], 5)? {
//!     println!("{}: {:.3}", store.get(id)?.chunk.content, distance);
//! }
//! # Ok(())
//! # }
//! ```

mod embedder;
mod error;
mod flat_index;
mod paths;
mod store;
mod types;

pub use embedder::{embedder_from_env, Embedder, EmbeddingMode, HttpEmbedder, StubEmbedder};
pub use error::{Result, VectorStoreError};
pub use flat_index::FlatIndex;
pub use paths::{index_path, records_path, INDEX_FILE_NAME, RECORDS_FILE_NAME};
pub use store::{RecordStore, RECORDS_SCHEMA_VERSION};
pub use types::VectorRecord;

// Re-export chunk types for convenience
pub use passage_doc_chunker::{ChunkMetadata, DocChunk};
