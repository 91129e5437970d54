use passage_doc_chunker::DocChunk;

/// One indexed chunk: a positional identifier, its embedding, and the chunk
/// it represents.
///
/// `id` is the record's offset in the backing collection: 0-based,
/// contiguous, and stable for the lifetime of one built index. The same
/// offset addresses the companion vector in the index file, so a store and
/// its index must always come from the same ordered build.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub id: usize,
    pub embedding: Vec<f32>,
    pub chunk: DocChunk,
}
