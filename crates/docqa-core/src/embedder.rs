//! Embedding capability trait

use async_trait::async_trait;

use crate::Result;

/// Trait for embedding providers
///
/// `embed` is batched: one call returns one fixed-length vector per input
/// string, in input order. Callers embed whole ingestion batches in a
/// single call rather than once per chunk, so every vector in a corpus
/// comes from the same model invocation scale.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per input, same order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
