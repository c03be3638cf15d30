//! Completion capability trait

use async_trait::async_trait;

use crate::Result;

/// Trait for text completion providers (e.g., an OpenAI-compatible API)
///
/// A single round-trip generation call. Streaming is not part of this
/// contract; backends that stream internally return the collected text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the given prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}
