use crate::error::{Result, VectorStoreError};
use ndarray::{Array2, ArrayView1};
use std::cmp::Ordering;
use std::path::Path;

const INDEX_MAGIC: [u8; 4] = *b"PFIX";
const INDEX_FORMAT_VERSION: u32 = 1;
const INDEX_HEADER_LEN: usize = 16;

/// Exact nearest-neighbor index over a fixed batch of vectors.
///
/// Queries scan every stored vector and rank by squared Euclidean distance,
/// O(N * dim) per query. The structure is immutable after construction:
/// adding vectors means rebuilding from the full record sequence.
#[derive(Debug)]
pub struct FlatIndex {
    vectors: Array2<f32>,
}

impl FlatIndex {
    /// Build an index over `vectors`, one row per record in insertion order.
    ///
    /// Fails with `EmptyInput` when no vectors are given and with
    /// `DimensionMismatch` when vector lengths differ.
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self> {
        if vectors.is_empty() {
            return Err(VectorStoreError::EmptyInput);
        }
        let dim = vectors[0].len();
        if dim == 0 {
            return Err(VectorStoreError::invalid_argument(
                "vectors must have nonzero dimension",
            ));
        }

        let mut data = Vec::with_capacity(vectors.len() * dim);
        for vector in vectors {
            if vector.len() != dim {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            data.extend_from_slice(vector);
        }

        let vectors = Array2::from_shape_vec((vectors.len(), dim), data)
            .map_err(|e| VectorStoreError::invalid_argument(e.to_string()))?;
        log::debug!(
            "Built flat index: {} vectors, dimension {}",
            vectors.nrows(),
            vectors.ncols()
        );
        Ok(Self { vectors })
    }

    /// Vector dimensionality
    #[must_use]
    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    /// Number of indexed vectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    /// Whether the index holds no vectors (never true for a built index)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View of the stored vector at `id`, if in range
    #[must_use]
    pub fn vector(&self, id: usize) -> Option<ArrayView1<'_, f32>> {
        (id < self.len()).then(|| self.vectors.row(id))
    }

    /// Squared Euclidean distance between two stored vectors, if both ids
    /// are in range
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> Option<f32> {
        match (self.vector(a), self.vector(b)) {
            (Some(va), Some(vb)) => Some(squared_l2(va, vb)),
            _ => None,
        }
    }

    /// Return up to `k` record ids closest to `query`, ascending by squared
    /// Euclidean distance with ties broken by ascending id.
    ///
    /// `k` larger than the index size returns every record; `k == 0` fails
    /// with `InvalidArgument`, and a query of the wrong length with
    /// `DimensionMismatch`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if k == 0 {
            return Err(VectorStoreError::invalid_argument("top_k must be positive"));
        }
        if query.len() != self.dim() {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dim(),
                actual: query.len(),
            });
        }

        let query = ArrayView1::from(query);
        let mut hits: Vec<(usize, f32)> = self
            .vectors
            .rows()
            .into_iter()
            .enumerate()
            .map(|(id, row)| (id, squared_l2(row, query)))
            .collect();

        hits.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        hits.truncate(k);
        Ok(hits)
    }

    /// Write the index to `path` as a self-describing binary blob.
    ///
    /// Layout: magic, format version, `dim`, `N` (little-endian u32s), then
    /// `N * dim` little-endian f32 values in record order. The write goes
    /// through a temp file and rename so a crash never leaves a torn blob.
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut bytes = Vec::with_capacity(INDEX_HEADER_LEN + self.vectors.len() * 4);
        bytes.extend_from_slice(&INDEX_MAGIC);
        bytes.extend_from_slice(&INDEX_FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&u32::try_from(self.dim()).map_err(oversize)?.to_le_bytes());
        bytes.extend_from_slice(&u32::try_from(self.len()).map_err(oversize)?.to_le_bytes());
        for value in self.vectors.iter() {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        let tmp = path.with_extension("bin.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        log::info!(
            "Persisted flat index to {} ({} vectors, dimension {})",
            path.display(),
            self.len(),
            self.dim()
        );
        Ok(())
    }

    /// Load a previously persisted index.
    ///
    /// Fails with `NotFound` when no file exists at `path` and with
    /// `CorruptData` when the blob cannot be decoded.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VectorStoreError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let vectors = decode_index(&bytes)?;
        log::info!(
            "Loaded flat index from {} ({} vectors, dimension {})",
            path.display(),
            vectors.nrows(),
            vectors.ncols()
        );
        Ok(Self { vectors })
    }
}

fn squared_l2(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let diff = &a - &b;
    diff.dot(&diff)
}

fn oversize(_: std::num::TryFromIntError) -> VectorStoreError {
    VectorStoreError::invalid_argument("index too large for the on-disk format")
}

fn decode_index(bytes: &[u8]) -> Result<Array2<f32>> {
    if bytes.len() < INDEX_HEADER_LEN {
        return Err(VectorStoreError::corrupt("index blob shorter than header"));
    }
    if bytes[0..4] != INDEX_MAGIC {
        return Err(VectorStoreError::corrupt("bad index magic bytes"));
    }

    let version = read_u32(bytes, 4);
    if version != INDEX_FORMAT_VERSION {
        return Err(VectorStoreError::corrupt(format!(
            "unsupported index format version {version} (expected {INDEX_FORMAT_VERSION})"
        )));
    }

    let dim = read_u32(bytes, 8) as usize;
    let n = read_u32(bytes, 12) as usize;
    if dim == 0 || n == 0 {
        return Err(VectorStoreError::corrupt(format!(
            "degenerate index shape: {n} vectors of dimension {dim}"
        )));
    }

    let expected = INDEX_HEADER_LEN as u64 + (n as u64) * (dim as u64) * 4;
    if bytes.len() as u64 != expected {
        return Err(VectorStoreError::corrupt(format!(
            "index blob is {} bytes, expected {expected} for {n} x {dim}",
            bytes.len()
        )));
    }

    let data: Vec<f32> = bytes[INDEX_HEADER_LEN..]
        .chunks_exact(4)
        .map(|raw| f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
        .collect();
    Array2::from_shape_vec((n, dim), data)
        .map_err(|e| VectorStoreError::corrupt(e.to_string()))
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
