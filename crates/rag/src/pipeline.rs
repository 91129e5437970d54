use crate::error::Result;
use crate::llm::ChatProvider;
use crate::prompt::build_prompt;
use passage_doc_chunker::DocChunk;
use passage_retrieval::{RetrievalStrategy, Retriever};
use std::sync::Arc;

/// A generated answer plus the chunks that grounded it
#[derive(Debug, Clone)]
pub struct Answer {
    pub answer: String,
    pub context: Vec<DocChunk>,
}

/// End-to-end question answering: retrieve, prompt, generate.
///
/// Owns a retrieval session and a chat provider; like the retriever it is
/// read-only after construction and safe to share across concurrent
/// questions.
pub struct AnswerPipeline {
    retriever: Retriever,
    provider: Arc<dyn ChatProvider>,
}

impl AnswerPipeline {
    #[must_use]
    pub fn new(retriever: Retriever, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            retriever,
            provider,
        }
    }

    /// Answer `question` from the corpus: rank chunks with `strategy`,
    /// compose the prompt, and hand it to the provider. Retrieval and
    /// generation failures surface to the caller unchanged.
    pub async fn answer(
        &self,
        question: &str,
        strategy: &RetrievalStrategy,
        top_k: usize,
    ) -> Result<Answer> {
        let context = self.retriever.retrieve(question, strategy, top_k).await?;
        log::debug!("Answering with {} context chunks", context.len());

        let prompt = build_prompt(&context, question);
        let answer = self.provider.generate(&prompt).await?;
        Ok(Answer { answer, context })
    }
}
