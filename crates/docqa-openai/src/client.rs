//! OpenAI-compatible HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use docqa_core::{CompletionProvider, Embedder, Error, Result};

use crate::config::OpenAiConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible embeddings + chat completions API.
///
/// One client serves both capability traits: [`Embedder`] via
/// `/embeddings` and [`CompletionProvider`] via `/chat/completions`.
/// Every failure is reported as the typed failure of the operation it
/// interrupted; nothing is retried here.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Model constants
    pub const TEXT_EMBEDDING_3_SMALL: &'static str = "text-embedding-3-small";
    pub const GPT_4O_MINI: &'static str = "gpt-4o-mini";

    /// Create a new client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    async fn perform_embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.config.base_url);
        let request = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::Embedding(format!(
                "embeddings request failed with status {}: {}",
                status, body
            )));
        }

        let mut body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("malformed embeddings response: {}", e)))?;

        body.data.sort_by_key(|d| d.index);
        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }

    async fn perform_complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.completion_model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Completion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::Completion(format!(
                "completion request failed with status {}: {}",
                status, body
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("malformed completion response: {}", e)))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Completion("empty completion response".to_string()));
        }

        Ok(text)
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(batch = texts.len(), model = %self.config.embedding_model, "embedding batch");
        match timeout(REQUEST_TIMEOUT, self.perform_embed(texts)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Embedding("embeddings request timed out".to_string())),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::debug!(chars = prompt.len(), model = %self.config.completion_model, "requesting completion");
        match timeout(REQUEST_TIMEOUT, self.perform_complete(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Completion("completion request timed out".to_string())),
        }
    }
}
