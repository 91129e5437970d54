use crate::error::{Result, RetrievalError};
use crate::hybrid::hybrid_search;
use crate::mmr::{mmr_search, MmrParams};
use crate::similarity::similarity_search;
use passage_doc_chunker::DocChunk;
use passage_vector_store::{
    index_path, records_path, Embedder, FlatIndex, RecordStore, VectorStoreError,
};
use std::path::Path;
use std::sync::Arc;

/// Ranking strategy selection for one retrieval call
#[derive(Debug, Clone)]
pub enum RetrievalStrategy {
    /// Plain nearest-neighbor ranking
    Similarity,

    /// Diversity-aware re-ranking
    Mmr(MmrParams),

    /// Semantic results merged with externally produced keyword matches
    Hybrid { keyword_matches: Vec<DocChunk> },
}

/// Session facade over a loaded corpus.
///
/// Owns the (store, index) pair for the lifetime of a retrieval session
/// plus the embedder that turns query text into vectors. Everything is
/// read-only after `open`, so one `Retriever` can serve any number of
/// concurrent `retrieve` calls. Open it once per process and share it;
/// reloading per query repeats the deserialization cost for nothing.
pub struct Retriever {
    store: RecordStore,
    index: FlatIndex,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever").finish_non_exhaustive()
    }
}

impl Retriever {
    /// Load the persisted (store, index) pair from a corpus directory.
    ///
    /// Fails with `IndexNotBuilt` when either file is missing, meaning the
    /// indexing pipeline has not run for this directory yet. Corrupt or
    /// inconsistent files surface as `CorruptData`.
    pub async fn open(dir: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let dir = dir.as_ref();
        let index = match FlatIndex::load(index_path(dir)).await {
            Ok(index) => index,
            Err(VectorStoreError::NotFound(_)) => {
                return Err(RetrievalError::IndexNotBuilt(dir.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let store = match RecordStore::load(records_path(dir), &index).await {
            Ok(store) => store,
            Err(VectorStoreError::NotFound(_)) => {
                return Err(RetrievalError::IndexNotBuilt(dir.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        log::info!(
            "Retrieval session opened over {} ({} records, dimension {}, model '{}')",
            dir.display(),
            store.len(),
            store.dim(),
            embedder.model_id()
        );
        Ok(Self {
            store,
            index,
            embedder,
        })
    }

    /// Build a session from already constructed parts. Useful when the
    /// corpus was just built in memory and has not gone to disk yet.
    #[must_use]
    pub fn from_parts(store: RecordStore, index: FlatIndex, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            store,
            index,
            embedder,
        }
    }

    /// Number of records in the session corpus
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the session corpus is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Embed the query text and rank chunks with the chosen strategy.
    ///
    /// Embedding failures and validation errors surface to the caller
    /// verbatim; nothing is retried and no partial ranking is returned.
    pub async fn retrieve(
        &self,
        query_text: &str,
        strategy: &RetrievalStrategy,
        top_k: usize,
    ) -> Result<Vec<DocChunk>> {
        let query = self.embedder.embed(query_text).await?;
        log::debug!(
            "Retrieving top {top_k} for query of {} chars",
            query_text.len()
        );

        match strategy {
            RetrievalStrategy::Similarity => {
                similarity_search(&query, &self.index, &self.store, top_k)
            }
            RetrievalStrategy::Mmr(params) => {
                mmr_search(&query, &self.index, &self.store, top_k, params)
            }
            RetrievalStrategy::Hybrid { keyword_matches } => {
                hybrid_search(&query, keyword_matches, &self.index, &self.store, top_k)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_doc_chunker::ChunkMetadata;
    use passage_vector_store::StubEmbedder;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn build_corpus(texts: &[&str]) -> (RecordStore, FlatIndex, Arc<dyn Embedder>) {
        let embedder: Arc<dyn Embedder> = Arc::new(StubEmbedder::new(16));
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let embeddings = embedder.embed_batch(&owned).await.unwrap();
        let chunks = texts
            .iter()
            .enumerate()
            .map(|(i, t)| DocChunk::new(t.to_string(), ChunkMetadata::new("docs.txt", i)))
            .collect();
        let index = FlatIndex::build(&embeddings).unwrap();
        let store = RecordStore::build(chunks, embeddings).unwrap();
        (store, index, embedder)
    }

    #[tokio::test]
    async fn retrieve_finds_the_indexed_text_itself() {
        let (store, index, embedder) = build_corpus(&["alpha text", "beta text", "gamma"]).await;
        let retriever = Retriever::from_parts(store, index, embedder);

        let chunks = retriever
            .retrieve("beta text", &RetrievalStrategy::Similarity, 1)
            .await
            .unwrap();
        assert_eq!(chunks[0].content, "beta text");
    }

    #[tokio::test]
    async fn strategies_share_the_same_session() {
        let (store, index, embedder) = build_corpus(&["one", "two", "three", "four"]).await;
        let retriever = Retriever::from_parts(store, index, embedder);

        let similarity = retriever
            .retrieve("one", &RetrievalStrategy::Similarity, 2)
            .await
            .unwrap();
        let mmr = retriever
            .retrieve("one", &RetrievalStrategy::Mmr(MmrParams::default()), 2)
            .await
            .unwrap();
        let hybrid = retriever
            .retrieve(
                "one",
                &RetrievalStrategy::Hybrid {
                    keyword_matches: vec![],
                },
                2,
            )
            .await
            .unwrap();

        assert_eq!(similarity.len(), 2);
        assert_eq!(mmr.len(), 2);
        assert_eq!(hybrid.len(), 2);
        assert_eq!(similarity[0].content, "one");
    }

    #[tokio::test]
    async fn open_on_an_unbuilt_directory_reports_index_not_built() {
        let dir = TempDir::new().unwrap();
        let embedder: Arc<dyn Embedder> = Arc::new(StubEmbedder::new(8));
        let err = Retriever::open(dir.path(), embedder).await.unwrap_err();
        assert!(matches!(err, RetrievalError::IndexNotBuilt(_)));
    }

    #[tokio::test]
    async fn open_round_trips_a_persisted_corpus() {
        let (store, index, embedder) = build_corpus(&["red", "green", "blue"]).await;
        let dir = TempDir::new().unwrap();
        index.persist(index_path(dir.path())).await.unwrap();
        store.persist(records_path(dir.path())).await.unwrap();

        let retriever = Retriever::open(dir.path(), embedder).await.unwrap();
        assert_eq!(retriever.len(), 3);

        let chunks = retriever
            .retrieve("green", &RetrievalStrategy::Similarity, 1)
            .await
            .unwrap();
        assert_eq!(chunks[0].content, "green");
    }
}
