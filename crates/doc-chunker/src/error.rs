use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during document loading and splitting
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid splitter configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Document directory does not exist or is not a directory
    #[error("Invalid document directory: {0}")]
    InvalidDirectory(String),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
