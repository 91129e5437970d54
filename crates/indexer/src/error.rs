use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Chunker error: {0}")]
    Chunker(#[from] passage_doc_chunker::ChunkerError),

    #[error("Vector store error: {0}")]
    VectorStore(#[from] passage_vector_store::VectorStoreError),

    #[error("Nothing to index under {0}")]
    EmptyCorpus(String),
}
