use std::time::Duration;

/// Summary of one completed index build
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Documents loaded from the source directory
    pub documents: usize,

    /// Chunks produced and indexed
    pub chunks: usize,

    /// Embedding dimensionality of the built corpus
    pub dim: usize,

    /// Wall-clock build duration
    pub elapsed: Duration,
}

impl IndexStats {
    /// One-line human-readable summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "indexed {} chunks from {} documents (dimension {}) in {:.2}s",
            self.chunks,
            self.documents,
            self.dim,
            self.elapsed.as_secs_f64()
        )
    }
}
