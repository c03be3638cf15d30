//! Core traits and types for docqa
//!
//! This crate defines the fundamental traits and types used across the docqa
//! system. It provides capability-facing interfaces for embedders, vector
//! indexes, completion providers, and document sources, making the system
//! test-friendly and extensible.

pub mod completion;
pub mod embedder;
pub mod error;
pub mod index;
pub mod session;
pub mod source;

pub use completion::CompletionProvider;
pub use embedder::Embedder;
pub use error::{Error, Result};
pub use index::{Chunk, ScoredChunk, VectorIndex};
pub use session::{ConversationSession, ConversationTurn, Role};
pub use source::{DocumentSource, ExtractOptions};
