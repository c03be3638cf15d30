//! In-memory vector index

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use docqa_core::{Chunk, Error, Result, ScoredChunk, VectorIndex};

/// In-process vector index with cosine similarity ranking.
///
/// Collections live only for the process lifetime; use
/// [`QdrantIndex`](crate::QdrantIndex) when the corpus must survive
/// restarts. Upserting an id that already exists replaces the stored
/// chunk.
pub struct MemoryIndex {
    collections: RwLock<HashMap<String, Vec<Chunk>>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn upsert(&self, collection: &str, chunks: Vec<Chunk>) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| Error::Index(format!("lock poisoned: {}", e)))?;
        let stored = collections.entry(collection.to_string()).or_default();

        for chunk in chunks {
            match stored.iter_mut().find(|c| c.id == chunk.id) {
                Some(existing) => *existing = chunk,
                None => stored.push(chunk),
            }
        }

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        let collections = self
            .collections
            .read()
            .map_err(|e| Error::Index(format!("lock poisoned: {}", e)))?;

        let Some(stored) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut results: Vec<ScoredChunk> = stored
            .iter()
            .map(|chunk| ScoredChunk {
                id: chunk.id,
                text: chunk.text.clone(),
                score: Self::cosine_similarity(&vector, &chunk.embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);

        Ok(results)
    }

    async fn len(&self, collection: &str) -> Result<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|e| Error::Index(format!("lock poisoned: {}", e)))?;
        Ok(collections.get(collection).map_or(0, |c| c.len()))
    }
}
