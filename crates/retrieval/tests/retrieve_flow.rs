use async_trait::async_trait;
use passage_doc_chunker::{ChunkMetadata, DocChunk};
use passage_retrieval::{RetrievalError, RetrievalStrategy, Retriever};
use passage_vector_store::{
    index_path, records_path, Embedder, FlatIndex, RecordStore, StubEmbedder, VectorStoreError,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Embedder that always fails, standing in for an unreachable service
struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    fn model_id(&self) -> &str {
        "broken"
    }

    async fn embed(&self, _text: &str) -> passage_vector_store::Result<Vec<f32>> {
        Err(VectorStoreError::embedding("service unreachable"))
    }
}

async fn persist_corpus(dir: &TempDir, texts: &[&str]) -> Arc<dyn Embedder> {
    let embedder: Arc<dyn Embedder> = Arc::new(StubEmbedder::new(16));
    let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
    let embeddings = embedder.embed_batch(&owned).await.unwrap();
    let chunks: Vec<DocChunk> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| DocChunk::new(t.to_string(), ChunkMetadata::new("docs.txt", i)))
        .collect();

    let index = FlatIndex::build(&embeddings).unwrap();
    let store = RecordStore::build(chunks, embeddings).unwrap();
    index.persist(index_path(dir.path())).await.unwrap();
    store.persist(records_path(dir.path())).await.unwrap();
    embedder
}

#[tokio::test]
async fn full_session_flow_over_a_persisted_corpus() {
    let dir = TempDir::new().unwrap();
    let embedder = persist_corpus(&dir, &["apples are red", "the sky is blue", "grass is green"])
        .await;

    let retriever = Retriever::open(dir.path(), embedder).await.unwrap();
    let chunks = retriever
        .retrieve("the sky is blue", &RetrievalStrategy::Similarity, 2)
        .await
        .unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, "the sky is blue");
    assert_eq!(chunks[0].metadata.source, "docs.txt");
}

#[tokio::test]
async fn embedding_failures_surface_verbatim() {
    let dir = TempDir::new().unwrap();
    persist_corpus(&dir, &["something indexed"]).await;

    let retriever = Retriever::open(dir.path(), Arc::new(BrokenEmbedder))
        .await
        .unwrap();
    let err = retriever
        .retrieve("any query", &RetrievalStrategy::Similarity, 3)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RetrievalError::Store(VectorStoreError::EmbeddingFailure(_))
    ));
}

#[tokio::test]
async fn missing_index_is_reported_before_any_embedding_happens() {
    let dir = TempDir::new().unwrap();
    // BrokenEmbedder would fail any embed call; open must fail first.
    let err = Retriever::open(dir.path(), Arc::new(BrokenEmbedder))
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::IndexNotBuilt(_)));
}
