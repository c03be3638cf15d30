//! Corpus store, vector index backends, and RAG engine for docqa
//!
//! This crate provides the ingestion/retrieval pipeline: a corpus store that
//! embeds and indexes text chunks, index backends (in-memory and Qdrant), a
//! plain-text document source, and the engine that grounds completions in
//! retrieved context.

mod corpus;
mod engine;
mod memory_index;
mod qdrant_index;
mod source;

#[cfg(test)]
mod testing;

pub use corpus::{CorpusStore, DEFAULT_TOP_K};
pub use engine::{EngineConfig, RagEngine};
pub use memory_index::MemoryIndex;
pub use qdrant_index::QdrantIndex;
pub use source::PlainTextSource;

// Re-export core types for convenience
pub use docqa_core::{
    Chunk, CompletionProvider, ConversationSession, ConversationTurn, DocumentSource, Embedder,
    Error, ExtractOptions, Result, Role, ScoredChunk, VectorIndex,
};
