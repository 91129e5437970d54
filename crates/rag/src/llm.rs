use crate::error::{RagError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

/// Text-generation collaborator: prompt in, completed answer out.
///
/// Providers own their timeout and retry policy; callers just propagate
/// whatever failure comes back.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logs (e.g. "openai-compat")
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Chat provider for OpenAI-compatible `/v1/chat/completions` endpoints
/// (Groq, LM Studio, Ollama, and the hosted originals all speak this).
#[derive(Clone)]
pub struct OpenAiChatProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiChatProvider {
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
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    fn name(&self) -> &str {
        "openai-compat"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RagError::generation(format!("request to {url} failed: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(RagError::generation(format!(
                "chat endpoint returned {status}: {detail}"
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| RagError::generation(format!("unparseable chat response: {e}")))?;
        let answer = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RagError::generation("chat response carried no choices"))?;

        log::debug!("Generated {} chars via {}", answer.len(), self.name());
        Ok(answer)
    }
}

/// Construct a chat provider from the process environment:
/// `PASSAGE_LLM_URL` and `PASSAGE_LLM_MODEL` are required,
/// `PASSAGE_LLM_API_KEY` optional.
pub fn provider_from_env() -> Result<Arc<dyn ChatProvider>> {
    let base_url = env::var("PASSAGE_LLM_URL")
        .map_err(|_| RagError::invalid_config("PASSAGE_LLM_URL is required"))?;
    let model = env::var("PASSAGE_LLM_MODEL")
        .map_err(|_| RagError::invalid_config("PASSAGE_LLM_MODEL is required"))?;

    let mut provider = OpenAiChatProvider::new(base_url, model);
    if let Ok(key) = env::var("PASSAGE_LLM_API_KEY") {
        provider = provider.with_api_key(key);
    }
    Ok(Arc::new(provider))
}
