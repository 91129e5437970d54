use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A loaded source document before splitting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Full text content
    pub content: String,

    /// Provenance metadata
    pub metadata: DocMetadata,
}

/// Metadata attached to a whole document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocMetadata {
    /// Originating document identifier (usually a relative file path)
    pub source: String,

    /// Arbitrary additional annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Document {
    /// Create a new document with the given source identifier
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: DocMetadata {
                source: source.into(),
                extra: BTreeMap::new(),
            },
        }
    }
}

/// A bounded span of document text plus its provenance metadata.
///
/// This is the unit of retrieval: chunks are embedded, indexed, and
/// returned to callers in ranked order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocChunk {
    /// The chunk text, non-empty
    pub content: String,

    /// Provenance and position metadata
    pub metadata: ChunkMetadata,
}

/// Metadata attached to a chunk
///
/// `chunk_index` values are unique within a `source` and increase
/// monotonically in original document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Originating document identifier
    pub source: String,

    /// Zero-based position within the source document
    pub chunk_index: usize,

    /// Arbitrary additional annotations inherited from the document
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl DocChunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(content: String, metadata: ChunkMetadata) -> Self {
        Self { content, metadata }
    }

    /// Character count of the chunk content
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

impl ChunkMetadata {
    /// Metadata for position `chunk_index` within `source`
    pub fn new(source: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            source: source.into(),
            chunk_index,
            extra: BTreeMap::new(),
        }
    }

    /// Builder: add an annotation
    #[must_use]
    pub fn annotate(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_char_count_is_in_characters() {
        let chunk = DocChunk::new("héllo".to_string(), ChunkMetadata::new("a.txt", 0));
        assert_eq!(chunk.char_count(), 5);
        assert!(chunk.content.len() > 5);
    }

    #[test]
    fn metadata_annotations_round_trip() {
        let meta = ChunkMetadata::new("a.txt", 3).annotate("lang", "en");
        let json = serde_json::to_string(&meta).unwrap();
        let back: ChunkMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
        assert_eq!(back.extra.get("lang").map(String::as_str), Some("en"));
    }
}
