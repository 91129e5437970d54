use crate::error::{Result, VectorStoreError};
use crate::flat_index::FlatIndex;
use crate::types::VectorRecord;
use passage_doc_chunker::{ChunkMetadata, DocChunk};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const RECORDS_SCHEMA_VERSION: u32 = 1;

/// Ordered collection of [`VectorRecord`]s for one built corpus.
///
/// Record ids are positional offsets into this collection and double as the
/// ids returned by the companion [`FlatIndex`], so both structures must be
/// built from the same chunk/embedding sequence and persisted together.
/// The store is read-only after construction.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<VectorRecord>,
    dim: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecords {
    schema_version: u32,
    records: Vec<PersistedRecord>,
}

/// On-disk record shape: content and metadata only. The raw vectors live in
/// the companion index file at the same positions.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    content: String,
    metadata: ChunkMetadata,
}

impl RecordStore {
    /// Pair `chunks[i]` with `embeddings[i]` into records with positional
    /// ids.
    ///
    /// Fails with `LengthMismatch` when the two sequences differ in length
    /// and with `DimensionMismatch` when embedding lengths are inconsistent
    /// (the first embedding fixes the dimension).
    pub fn build(chunks: Vec<DocChunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let dim = embeddings.first().map(Vec::len).unwrap_or(0);
        let mut records = Vec::with_capacity(chunks.len());
        for (id, (chunk, embedding)) in chunks.into_iter().zip(embeddings).enumerate() {
            if embedding.len() != dim {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: dim,
                    actual: embedding.len(),
                });
            }
            records.push(VectorRecord {
                id,
                embedding,
                chunk,
            });
        }

        log::debug!("Built record store: {} records, dimension {dim}", records.len());
        Ok(Self { records, dim })
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimensionality (0 for an empty store)
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Record at positional `id`, failing with `OutOfRange` when `id` is
    /// not below the store length.
    pub fn get(&self, id: usize) -> Result<&VectorRecord> {
        self.records.get(id).ok_or(VectorStoreError::OutOfRange {
            id,
            len: self.records.len(),
        })
    }

    /// All records in id order
    #[must_use]
    pub fn records(&self) -> &[VectorRecord] {
        &self.records
    }

    /// Write the ordered record sequence (content and metadata only) to
    /// `path` as schema-versioned JSON, via a temp file and rename.
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let persisted = PersistedRecords {
            schema_version: RECORDS_SCHEMA_VERSION,
            records: self
                .records
                .iter()
                .map(|record| PersistedRecord {
                    content: record.chunk.content.clone(),
                    metadata: record.chunk.metadata.clone(),
                })
                .collect(),
        };
        let bytes = serde_json::to_vec_pretty(&persisted)?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        log::info!(
            "Persisted {} records to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a store previously written by [`RecordStore::persist`],
    /// re-pairing each record with its vector from the already loaded
    /// companion `index`.
    ///
    /// Fails with `NotFound` when no file exists at `path`, and with
    /// `CorruptData` when the JSON cannot be parsed, the schema version is
    /// unsupported, or the record count disagrees with the index's vector
    /// count.
    pub async fn load(path: impl AsRef<Path>, index: &FlatIndex) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VectorStoreError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let persisted: PersistedRecords = serde_json::from_slice(&bytes)
            .map_err(|e| VectorStoreError::corrupt(format!("unparseable records file: {e}")))?;
        if persisted.schema_version != RECORDS_SCHEMA_VERSION {
            return Err(VectorStoreError::corrupt(format!(
                "unsupported records schema_version {} (expected {RECORDS_SCHEMA_VERSION})",
                persisted.schema_version
            )));
        }
        if persisted.records.len() != index.len() {
            return Err(VectorStoreError::corrupt(format!(
                "records file holds {} entries but the index holds {} vectors",
                persisted.records.len(),
                index.len()
            )));
        }

        let records = persisted
            .records
            .into_iter()
            .enumerate()
            .map(|(id, record)| {
                // In range: the count was checked against the index above.
                let embedding = index.vector(id).map(|v| v.to_vec()).unwrap_or_default();
                VectorRecord {
                    id,
                    embedding,
                    chunk: DocChunk::new(record.content, record.metadata),
                }
            })
            .collect();

        log::info!(
            "Loaded {} records from {} (dimension {})",
            index.len(),
            path.display(),
            index.dim()
        );
        Ok(Self {
            records,
            dim: index.dim(),
        })
    }
}
