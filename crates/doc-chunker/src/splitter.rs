use crate::error::{ChunkerError, Result};
use crate::types::{ChunkMetadata, DocChunk, Document};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Configuration for fixed-window text splitting
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Window size in characters (hard limit per chunk)
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// Splits document text into overlapping fixed-size windows.
///
/// Windows end on word boundaries where possible so that chunks do not cut
/// through the middle of a word; a single token longer than `chunk_size` is
/// hard-cut. Splitting is deterministic for a given configuration.
#[derive(Debug)]
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    /// Create a splitter, validating the configuration.
    ///
    /// `chunk_size` must be positive and `chunk_overlap` strictly smaller
    /// than `chunk_size`, otherwise consecutive windows could not advance.
    pub fn new(config: SplitterConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(ChunkerError::invalid_config("chunk_size must be positive"));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(ChunkerError::invalid_config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        Ok(Self { config })
    }

    /// Splitter with the default window geometry
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: SplitterConfig::default(),
        }
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split one document into chunks, injecting `chunk_index` in document
    /// order. Document-level annotations are inherited by every chunk.
    pub fn split(&self, doc: &Document) -> Vec<DocChunk> {
        let windows = split_windows(
            &doc.content,
            self.config.chunk_size,
            self.config.chunk_overlap,
        );
        windows
            .into_iter()
            .enumerate()
            .map(|(i, content)| {
                let metadata = ChunkMetadata {
                    source: doc.metadata.source.clone(),
                    chunk_index: i,
                    extra: doc.metadata.extra.clone(),
                };
                DocChunk::new(content, metadata)
            })
            .collect()
    }

    /// Split a batch of documents, preserving input order.
    pub fn split_documents(&self, docs: &[Document]) -> Vec<DocChunk> {
        let chunks: Vec<DocChunk> = docs.iter().flat_map(|doc| self.split(doc)).collect();
        log::debug!("Split {} documents into {} chunks", docs.len(), chunks.len());
        chunks
    }
}

/// Cut `text` into windows of at most `size` characters, each window sharing
/// `overlap` characters with its predecessor. Window ends snap down to the
/// last word boundary inside the window when one exists past the window
/// start. All-whitespace windows are dropped.
fn split_windows(text: &str, size: usize, overlap: usize) -> Vec<String> {
    // Byte offset of every character, with a terminal sentinel at text.len()
    let char_offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = char_offsets.len() - 1;
    if total_chars == 0 {
        return Vec::new();
    }

    // Candidate end positions: every word-boundary byte offset except 0
    let bounds: Vec<usize> = text
        .split_word_bound_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut out = Vec::new();
    let mut start_char = 0usize;
    while start_char < total_chars {
        let hard_end_char = (start_char + size).min(total_chars);
        let mut end_char = hard_end_char;
        if hard_end_char < total_chars {
            let start_byte = char_offsets[start_char];
            let hard_end_byte = char_offsets[hard_end_char];
            let idx = bounds.partition_point(|&b| b <= hard_end_byte);
            if idx > 0 && bounds[idx - 1] > start_byte {
                end_char = byte_to_char(&char_offsets, bounds[idx - 1]);
            }
        }

        let piece = text[char_offsets[start_char]..char_offsets[end_char]].trim();
        if !piece.is_empty() {
            out.push(piece.to_string());
        }

        if end_char >= total_chars {
            break;
        }
        // Step back `overlap` characters, but always advance past the
        // previous window start.
        start_char = end_char.saturating_sub(overlap).max(start_char + 1);
    }
    out
}

fn byte_to_char(char_offsets: &[usize], byte: usize) -> usize {
    char_offsets.partition_point(|&b| b < byte)
}
