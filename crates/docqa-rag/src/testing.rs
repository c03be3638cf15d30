//! Deterministic test doubles for the network-facing capabilities

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use docqa_core::{Chunk, CompletionProvider, Embedder, Error, Result, ScoredChunk, VectorIndex};

const DIMS: usize = 128;

/// Embeds text as a hashed bag of words, so token overlap translates into
/// cosine similarity without a model in the loop.
pub struct HashEmbedder;

impl HashEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; DIMS];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            vector[(hasher.finish() % DIMS as u64) as usize] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}

/// Counts batched embed calls, delegating to [`HashEmbedder`]
pub struct CountingEmbedder {
    calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for CountingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        HashEmbedder::new().embed(texts).await
    }
}

/// Always returns one vector fewer than requested
pub struct MismatchedEmbedder;

#[async_trait]
impl Embedder for MismatchedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; DIMS]; texts.len().saturating_sub(1)])
    }
}

/// Returns a scripted reply and records every prompt it was handed
pub struct CapturingCompletion {
    reply: String,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CapturingCompletion {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for CapturingCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every completion call
pub struct FailingCompletion {
    calls: AtomicUsize,
}

impl FailingCompletion {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Completion("completion backend unavailable".to_string()))
    }
}

/// Empty index that counts queries
pub struct NullIndex {
    queries: AtomicUsize,
}

impl NullIndex {
    pub fn new() -> Self {
        Self { queries: AtomicUsize::new(0) }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorIndex for NullIndex {
    async fn upsert(&self, _collection: &str, _chunks: Vec<Chunk>) -> Result<()> {
        Ok(())
    }

    async fn query(
        &self,
        _collection: &str,
        _vector: Vec<f32>,
        _top_k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn len(&self, _collection: &str) -> Result<usize> {
        Ok(0)
    }
}
