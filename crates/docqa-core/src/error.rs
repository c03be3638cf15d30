//! Error types for the docqa system

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the docqa system
///
/// `Embedding`, `Retrieval`, and `Completion` are the three failure classes
/// the pipeline propagates to callers; the rest cover the machinery around
/// them. No variant is retried internally.
#[derive(Error, Debug)]
pub enum Error {
    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("completion failed: {0}")]
    Completion(String),

    #[error("vector index error: {0}")]
    Index(String),

    #[error("document source error: {0}")]
    Source(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
