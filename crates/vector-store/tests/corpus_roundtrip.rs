use passage_doc_chunker::{ChunkMetadata, DocChunk};
use passage_vector_store::{
    index_path, records_path, Embedder, FlatIndex, RecordStore, StubEmbedder, VectorStoreError,
};
use tempfile::TempDir;

fn chunk(source: &str, idx: usize, text: &str) -> DocChunk {
    DocChunk::new(text.to_string(), ChunkMetadata::new(source, idx))
}

#[tokio::test]
async fn built_corpus_survives_persist_and_reload() {
    let texts = [
        "the cat sat on the mat",
        "a dog barked at the mailman",
        "quantum entanglement links particle states",
        "the stock market closed higher today",
    ];

    let embedder = StubEmbedder::new(24);
    let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
    let embeddings = embedder.embed_batch(&owned).await.unwrap();

    let chunks: Vec<DocChunk> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| chunk("corpus.txt", i, text))
        .collect();

    let index = FlatIndex::build(&embeddings).unwrap();
    let store = RecordStore::build(chunks, embeddings).unwrap();

    let dir = TempDir::new().unwrap();
    index.persist(index_path(dir.path())).await.unwrap();
    store.persist(records_path(dir.path())).await.unwrap();

    let reloaded_index = FlatIndex::load(index_path(dir.path())).await.unwrap();
    let reloaded_store = RecordStore::load(records_path(dir.path()), &reloaded_index)
        .await
        .unwrap();

    // Record-for-record equality, embeddings included
    assert_eq!(reloaded_store.len(), store.len());
    for id in 0..store.len() {
        assert_eq!(reloaded_store.get(id).unwrap(), store.get(id).unwrap());
    }

    // Ranking-identical search for fresh probe queries
    for probe_text in ["cats and mats", "finance news", "physics"] {
        let probe = embedder.embed(probe_text).await.unwrap();
        assert_eq!(
            reloaded_index.search(&probe, 4).unwrap(),
            index.search(&probe, 4).unwrap(),
            "ranking diverged for probe '{probe_text}'"
        );
    }
}

#[tokio::test]
async fn nearest_result_matches_brute_force_minimum() {
    let embedder = StubEmbedder::new(12);
    let owned: Vec<String> = (0..20).map(|i| format!("document number {i}")).collect();
    let embeddings = embedder.embed_batch(&owned).await.unwrap();
    let index = FlatIndex::build(&embeddings).unwrap();

    let probe = embedder.embed("document number 7").await.unwrap();
    let hits = index.search(&probe, 1).unwrap();

    let min_distance = embeddings
        .iter()
        .map(|v| {
            v.iter()
                .zip(&probe)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f32>()
        })
        .fold(f32::INFINITY, f32::min);
    assert!((hits[0].1 - min_distance).abs() < 1e-6);
    // The probe text is itself indexed, so the best hit is its own record.
    assert_eq!(hits[0].0, 7);
}

#[tokio::test]
async fn loading_from_an_unbuilt_directory_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let err = FlatIndex::load(index_path(dir.path())).await.unwrap_err();
    assert!(matches!(err, VectorStoreError::NotFound(_)));
}
