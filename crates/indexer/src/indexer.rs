use crate::error::{IndexerError, Result};
use crate::stats::IndexStats;
use passage_doc_chunker::{load_documents, SplitterConfig, TextSplitter};
use passage_vector_store::{index_path, records_path, Embedder, FlatIndex, RecordStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Builds a persisted retrieval corpus from a directory of documents.
///
/// The same embedder configuration must later be used for queries against
/// the built corpus, or ranking quality silently degrades; only the
/// index's dimension check guards against an outright model swap.
pub struct CorpusIndexer {
    docs_dir: PathBuf,
    out_dir: PathBuf,
    splitter: TextSplitter,
    embedder: Arc<dyn Embedder>,
}

impl CorpusIndexer {
    /// Create an indexer reading from `docs_dir` and writing the corpus
    /// files to `out_dir`.
    pub fn new(
        docs_dir: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        splitter_config: SplitterConfig,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        Ok(Self {
            docs_dir: docs_dir.as_ref().to_path_buf(),
            out_dir: out_dir.as_ref().to_path_buf(),
            splitter: TextSplitter::new(splitter_config)?,
            embedder,
        })
    }

    /// Run the full pipeline: load, split, embed, build, persist.
    ///
    /// A file the loader cannot read is skipped with a warning; every
    /// failure after loading aborts the build. Both corpus files are
    /// written before this returns, so a successful build is immediately
    /// queryable.
    pub async fn build(&self) -> Result<IndexStats> {
        let started = Instant::now();

        let documents = load_documents(&self.docs_dir)?;
        log::info!(
            "Indexing {} documents from {}",
            documents.len(),
            self.docs_dir.display()
        );

        let chunks = self.splitter.split_documents(&documents);
        if chunks.is_empty() {
            return Err(IndexerError::EmptyCorpus(
                self.docs_dir.display().to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        log::info!(
            "Embedded {} chunks with model '{}'",
            embeddings.len(),
            self.embedder.model_id()
        );

        let index = FlatIndex::build(&embeddings)?;
        let store = RecordStore::build(chunks, embeddings)?;

        index.persist(index_path(&self.out_dir)).await?;
        store.persist(records_path(&self.out_dir)).await?;

        let stats = IndexStats {
            documents: documents.len(),
            chunks: store.len(),
            dim: index.dim(),
            elapsed: started.elapsed(),
        };
        log::info!("Index build complete: {}", stats.summary());
        Ok(stats)
    }
}
