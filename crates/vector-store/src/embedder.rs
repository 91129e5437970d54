use crate::error::{Result, VectorStoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

/// Text-to-vector collaborator.
///
/// Implementations must be pure in the retrieval sense: the same text and
/// model always produce the same vector, and the model used at index build
/// time must be the model used at query time. Nothing here enforces that
/// beyond the index's own dimension check, so `model_id` exists to let
/// callers record and compare the choice.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Identifier of the underlying embedding model
    fn model_id(&self) -> &str;

    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, one vector per input in order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Deterministic hash-based embedder for tests and offline runs.
///
/// Vectors are pseudo-random unit vectors seeded from the text bytes:
/// identical texts always collide, distinct texts are near-orthogonal in
/// expectation. Useless for semantic quality, ideal for exercising the
/// store and index without a model.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    pub const DEFAULT_DIMENSION: usize = 384;

    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Configured output dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    fn model_id(&self) -> &str {
        "stub"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(hash_embed(text, self.dimension))
    }
}

fn hash_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state = fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vector = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        // Top 24 bits to a float in [-1, 1)
        let unit = (bits >> 40) as f32 / (1u32 << 23) as f32;
        vector.push(unit - 1.0);
    }
    normalize(&mut vector);
    vector
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    } else if let Some(first) = vector.first_mut() {
        *first = 1.0;
    }
}

/// Embedder backed by an OpenAI-compatible `/v1/embeddings` endpoint.
#[derive(Clone)]
pub struct HttpEmbedder {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingEntry {
    index: usize,
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let body = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VectorStoreError::embedding(format!("request to {url} failed: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::embedding(format!(
                "embedding endpoint returned {status}: {detail}"
            )));
        }

        let payload: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::embedding(format!("unparseable embedding response: {e}")))?;
        if payload.data.len() != texts.len() {
            return Err(VectorStoreError::embedding(format!(
                "requested {} embeddings, got {}",
                texts.len(),
                payload.data.len()
            )));
        }

        let mut entries = payload.data;
        entries.sort_by_key(|entry| entry.index);
        Ok(entries.into_iter().map(|entry| entry.embedding).collect())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = vec![text.to_string()];
        let mut vectors = self.request(&input).await?;
        vectors
            .pop()
            .ok_or_else(|| VectorStoreError::embedding("empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}

/// Which embedding backend to construct
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmbeddingMode {
    Stub,
    Http,
}

impl EmbeddingMode {
    /// Read the mode from `PASSAGE_EMBEDDING_MODE` (default: stub)
    pub fn from_env() -> Result<Self> {
        let raw = env::var("PASSAGE_EMBEDDING_MODE").unwrap_or_else(|_| "stub".to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "http" => Ok(Self::Http),
            other => Err(VectorStoreError::invalid_argument(format!(
                "unsupported PASSAGE_EMBEDDING_MODE '{other}' (expected 'stub' or 'http')"
            ))),
        }
    }
}

/// Construct an embedder from the process environment.
///
/// `stub` mode needs nothing; `http` mode reads `PASSAGE_EMBEDDING_URL`,
/// `PASSAGE_EMBEDDING_MODEL`, and optionally `PASSAGE_EMBEDDING_API_KEY`.
pub fn embedder_from_env() -> Result<Arc<dyn Embedder>> {
    match EmbeddingMode::from_env()? {
        EmbeddingMode::Stub => Ok(Arc::new(StubEmbedder::default())),
        EmbeddingMode::Http => {
            let base_url = env::var("PASSAGE_EMBEDDING_URL").map_err(|_| {
                VectorStoreError::invalid_argument(
                    "PASSAGE_EMBEDDING_URL is required in http embedding mode",
                )
            })?;
            let model = env::var("PASSAGE_EMBEDDING_MODEL").map_err(|_| {
                VectorStoreError::invalid_argument(
                    "PASSAGE_EMBEDDING_MODEL is required in http embedding mode",
                )
            })?;
            let mut embedder = HttpEmbedder::new(base_url, model);
            if let Ok(key) = env::var("PASSAGE_EMBEDDING_API_KEY") {
                embedder = embedder.with_api_key(key);
            }
            Ok(Arc::new(embedder))
        }
    }
}
