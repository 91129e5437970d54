use thiserror::Error;

pub type Result<T> = std::result::Result<T, RagError>;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] passage_retrieval::RetrievalError),

    #[error("Generation failure: {0}")]
    GenerationFailure(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RagError {
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::GenerationFailure(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
