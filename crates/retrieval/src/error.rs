use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Vector store error: {0}")]
    Store(#[from] passage_vector_store::VectorStoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index not built at {0}: run the indexing pipeline first")]
    IndexNotBuilt(PathBuf),
}

impl RetrievalError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
