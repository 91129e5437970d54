use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Length mismatch: {chunks} chunks vs {embeddings} embeddings")]
    LengthMismatch { chunks: usize, embeddings: usize },

    #[error("Empty input: at least one vector is required")]
    EmptyInput,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Record id {id} out of range (store holds {len} records)")]
    OutOfRange { id: usize, len: usize },

    #[error("No persisted data at {0}")]
    NotFound(PathBuf),

    #[error("Corrupt persisted data: {0}")]
    CorruptData(String),

    #[error("Embedding failure: {0}")]
    EmbeddingFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VectorStoreError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a corrupt data error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptData(msg.into())
    }

    /// Create an embedding failure error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingFailure(msg.into())
    }
}
