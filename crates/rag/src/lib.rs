//! # Passage RAG
//!
//! The answer-generation layer on top of retrieval: composes a prompt from
//! ranked chunks and a question, sends it to a chat-completion service,
//! and returns the generated answer together with the supporting context.
//!
//! The retrieval core stays unaware of any of this; generation quality and
//! latency live entirely behind the [`ChatProvider`] seam.

mod error;
mod llm;
mod pipeline;
mod prompt;

pub use error::{RagError, Result};
pub use llm::{provider_from_env, ChatProvider, OpenAiChatProvider};
pub use pipeline::{Answer, AnswerPipeline};
pub use prompt::build_prompt;
