//! Corpus store: a named, queryable collection of embedded text chunks

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use docqa_core::{Chunk, Embedder, Error, Result, ScoredChunk, VectorIndex};

/// Default number of chunks returned by a search
pub const DEFAULT_TOP_K: usize = 5;

/// A named collection of embedded text chunks backed by a vector index.
///
/// The store owns the chunk-to-embedding mapping and delegates physical
/// storage and nearest-neighbor search to the injected [`VectorIndex`].
/// Embeddings are computed once, at ingestion time, in a single batched
/// call to the injected [`Embedder`].
///
/// Ids come from a monotonic counter seeded with the collection's size at
/// attach time. The corpus is append-only (nothing here deletes chunks),
/// so the counter stays collision-free across repeated ingest calls and
/// across reattachment to a pre-populated collection.
pub struct CorpusStore<E: Embedder, I: VectorIndex> {
    corpus: String,
    embedder: Arc<E>,
    index: Arc<I>,
    next_id: AtomicU64,
    session_ingested: AtomicUsize,
}

impl<E: Embedder, I: VectorIndex> CorpusStore<E, I> {
    /// Attach to a corpus, creating it lazily if it does not exist yet.
    ///
    /// Reattaching to a pre-populated collection is supported; the id
    /// counter resumes past the existing chunks.
    pub async fn attach(
        corpus: impl Into<String>,
        embedder: Arc<E>,
        index: Arc<I>,
    ) -> Result<Self> {
        let corpus = corpus.into();
        let existing = index.len(&corpus).await?;
        tracing::debug!(corpus = %corpus, existing, "attached to corpus");

        Ok(Self {
            corpus,
            embedder,
            index,
            next_id: AtomicU64::new(existing as u64),
            session_ingested: AtomicUsize::new(0),
        })
    }

    /// The collection name this store is attached to
    pub fn corpus(&self) -> &str {
        &self.corpus
    }

    /// Embed and store a batch of chunks, returning their assigned ids.
    ///
    /// The whole batch is embedded in one call to the embedding capability.
    /// There is no partial-success contract: on failure the index may have
    /// partially applied writes, but this store reports the batch as not
    /// ingested.
    pub async fn ingest(&self, chunks: &[String]) -> Result<Vec<u64>> {
        if chunks.is_empty() {
            return Err(Error::InvalidInput("ingest batch is empty".to_string()));
        }
        if let Some(pos) = chunks.iter().position(|c| c.trim().is_empty()) {
            return Err(Error::InvalidInput(format!("chunk {} is empty", pos)));
        }

        let embeddings = self
            .embedder
            .embed(chunks)
            .await
            .map_err(embedding_failure)?;

        if embeddings.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let base = self.next_id.fetch_add(chunks.len() as u64, Ordering::SeqCst);
        let records: Vec<Chunk> = chunks
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (text, embedding))| Chunk {
                id: base + i as u64,
                text: text.clone(),
                embedding,
            })
            .collect();
        let ids: Vec<u64> = records.iter().map(|c| c.id).collect();

        self.index.upsert(&self.corpus, records).await?;
        self.session_ingested.fetch_add(chunks.len(), Ordering::SeqCst);

        tracing::info!(corpus = %self.corpus, count = chunks.len(), "ingested chunks");
        Ok(ids)
    }

    /// Retrieve up to `top_k` chunks ranked by descending similarity.
    ///
    /// Embeds the query in one call and returns the index's native ranking.
    /// An empty corpus yields an empty list, not an error.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>> {
        if top_k == 0 {
            return Err(Error::InvalidInput("top_k must be positive".to_string()));
        }

        let mut vectors = self
            .embedder
            .embed(&[query.to_string()])
            .await
            .map_err(embedding_failure)?;
        let vector = vectors
            .pop()
            .ok_or_else(|| Error::Embedding("embedder returned no vector for query".to_string()))?;

        let results = self
            .index
            .query(&self.corpus, vector, top_k)
            .await
            .map_err(retrieval_failure)?;

        tracing::debug!(corpus = %self.corpus, query, results = results.len(), "search completed");
        Ok(results)
    }

    /// Total number of chunks in the corpus.
    ///
    /// The external index is the source of truth, so this includes chunks
    /// ingested by earlier processes attached to the same collection.
    pub async fn count(&self) -> Result<usize> {
        self.index.len(&self.corpus).await
    }

    /// Number of chunks ingested through this store instance in its current
    /// process lifetime. Diverges from [`count`](Self::count) when the store
    /// was attached to a pre-populated corpus.
    pub fn session_count(&self) -> usize {
        self.session_ingested.load(Ordering::SeqCst)
    }
}

fn embedding_failure(err: Error) -> Error {
    match err {
        e @ Error::Embedding(_) => e,
        other => Error::Embedding(other.to_string()),
    }
}

fn retrieval_failure(err: Error) -> Error {
    match err {
        e @ Error::Retrieval(_) => e,
        other => Error::Retrieval(other.to_string()),
    }
}
