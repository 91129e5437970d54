//! # Passage Doc Chunker
//!
//! Document loading and text chunking for passage retrieval.
//!
//! ## Architecture
//!
//! ```text
//! Document directory
//!     │
//!     ├──> Loader (extension dispatch: .txt, .md)
//!     │      └─> Document { content, source }
//!     │
//!     └──> TextSplitter (fixed window + overlap)
//!            └─> DocChunk[] with source + chunk_index metadata
//! ```
//!
//! Splitting is deterministic for a given `(chunk_size, chunk_overlap)`:
//! the same document always yields the same chunks, and `chunk_index`
//! preserves document order within each source.
//!
//! ## Example
//!
//! ```rust
//! use passage_doc_chunker::{Document, SplitterConfig, TextSplitter};
//!
//! let splitter = TextSplitter::new(SplitterConfig {
//!     chunk_size: 200,
//!     chunk_overlap: 20,
//! }).unwrap();
//!
//! let doc = Document::new("some long text ...", "notes.txt");
//! for chunk in splitter.split(&doc) {
//!     println!("{} #{}: {}", chunk.metadata.source, chunk.metadata.chunk_index, chunk.content);
//! }
//! ```

mod error;
mod loader;
mod splitter;
mod types;

pub use error::{ChunkerError, Result};
pub use loader::load_documents;
pub use splitter::{SplitterConfig, TextSplitter};
pub use types::{ChunkMetadata, DocChunk, DocMetadata, Document};
