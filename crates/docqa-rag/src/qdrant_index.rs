//! Qdrant-backed vector index

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder, point_id::PointIdOptions,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

use docqa_core::{Chunk, Error, Result, ScoredChunk, VectorIndex};

/// Vector index backed by a Qdrant server reachable over host/port.
///
/// Collections are created lazily on first upsert, with the batch's
/// dimensionality and cosine distance. Chunk text rides along in the point
/// payload so queries return it without a second lookup.
pub struct QdrantIndex {
    client: Qdrant,
}

impl QdrantIndex {
    /// Connect to a Qdrant endpoint, e.g. `http://localhost:6334`
    pub fn connect(url: &str) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| Error::Index(format!("qdrant client build failed: {}", e)))?;
        tracing::debug!(url, "connected qdrant client");
        Ok(Self { client })
    }

    async fn ensure_collection(&self, collection: &str, dim: usize) -> Result<()> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::Index(e.to_string()))?;

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(collection)
                        .vectors_config(VectorParamsBuilder::new(dim as u64, Distance::Cosine)),
                )
                .await
                .map_err(|e| Error::Index(format!("create collection failed: {}", e)))?;
            tracing::info!(collection, dim, "created qdrant collection");
        }

        Ok(())
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn upsert(&self, collection: &str, chunks: Vec<Chunk>) -> Result<()> {
        let Some(first) = chunks.first() else {
            return Ok(());
        };
        self.ensure_collection(collection, first.embedding.len()).await?;

        let points: Vec<PointStruct> = chunks
            .into_iter()
            .map(|chunk| {
                let mut payload = JsonMap::new();
                payload.insert("text".to_string(), JsonValue::String(chunk.text));
                PointStruct::new(chunk.id, chunk.embedding, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await
            .map_err(|e| Error::Index(format!("upsert failed: {}", e)))?;

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::Index(e.to_string()))?;
        if !exists {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(collection, vector, top_k as u64).with_payload(true),
            )
            .await
            .map_err(|e| Error::Index(format!("search failed: {}", e)))?;

        let mut results = Vec::new();
        for point in response.result {
            let id = match point.id.and_then(|id| id.point_id_options) {
                Some(PointIdOptions::Num(n)) => n,
                // Points written by something other than this store
                _ => continue,
            };
            let text = match point.payload.get("text").and_then(|v| v.as_str()) {
                Some(text) => text.to_string(),
                None => continue,
            };
            results.push(ScoredChunk {
                id,
                text,
                score: point.score,
            });
        }

        Ok(results)
    }

    async fn len(&self, collection: &str) -> Result<usize> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::Index(e.to_string()))?;
        if !exists {
            return Ok(0);
        }

        let response = self
            .client
            .count(CountPointsBuilder::new(collection).exact(true))
            .await
            .map_err(|e| Error::Index(format!("count failed: {}", e)))?;

        Ok(response.result.map_or(0, |r| r.count as usize))
    }
}
