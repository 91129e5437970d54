use passage_doc_chunker::DocChunk;

/// Compose the generation prompt from ranked context chunks and the user
/// question. Chunks are joined in ranked order with blank lines between
/// them; retrieval order is the only ranking signal the generator sees.
#[must_use]
pub fn build_prompt(chunks: &[DocChunk], question: &str) -> String {
    let context = chunks
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Use the following context to answer the question.\n\n\
         Context:\n{context}\n\n\
         Question: {question}\nAnswer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_doc_chunker::ChunkMetadata;

    fn chunk(text: &str, idx: usize) -> DocChunk {
        DocChunk::new(text.to_string(), ChunkMetadata::new("a.txt", idx))
    }

    #[test]
    fn prompt_contains_every_chunk_and_the_question() {
        let chunks = vec![chunk("first passage", 0), chunk("second passage", 1)];
        let prompt = build_prompt(&chunks, "what is this about?");

        assert!(prompt.contains("first passage"));
        assert!(prompt.contains("second passage"));
        assert!(prompt.contains("Question: what is this about?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn chunks_appear_in_ranked_order() {
        let chunks = vec![chunk("alpha", 0), chunk("omega", 1)];
        let prompt = build_prompt(&chunks, "q");
        let alpha = prompt.find("alpha").unwrap();
        let omega = prompt.find("omega").unwrap();
        assert!(alpha < omega);
    }

    #[test]
    fn empty_context_still_produces_a_well_formed_prompt() {
        let prompt = build_prompt(&[], "lonely question");
        assert!(prompt.contains("Context:\n\n"));
        assert!(prompt.contains("Question: lonely question"));
    }
}
