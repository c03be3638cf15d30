//! Vector index trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A unit of ingested text paired with its embedding vector.
///
/// Every chunk carries exactly one embedding, computed once at ingestion
/// time and never recomputed implicitly. Ids are assigned by the corpus
/// store and stay stable for the corpus's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: u64,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub id: u64,
    pub text: String,
    pub score: f32,
}

/// Trait for vector indexes (e.g., Qdrant, an in-memory index, etc.)
///
/// Implementations own physical storage and nearest-neighbor search for
/// named, collection-scoped sets of chunks. A collection that does not
/// exist yet reads as empty and is created on first upsert.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert chunks into a collection
    async fn upsert(&self, collection: &str, chunks: Vec<Chunk>) -> Result<()>;

    /// Nearest-neighbor query, ranked by descending similarity
    async fn query(&self, collection: &str, vector: Vec<f32>, top_k: usize)
        -> Result<Vec<ScoredChunk>>;

    /// Number of chunks currently stored in a collection
    async fn len(&self, collection: &str) -> Result<usize>;
}
