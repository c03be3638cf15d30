//! OpenAI client configuration

use std::env;

use serde::{Deserialize, Serialize};
use url::Url;

use docqa_core::{Error, Result};

/// Configuration for the OpenAI-compatible client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub completion_model: String,
}

impl OpenAiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Configuration("OPENAI_API_KEY environment variable not found".to_string())
        })?;

        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let embedding_model = env::var("OPENAI_EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-3-small".to_string());

        let completion_model =
            env::var("OPENAI_COMPLETION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Self::new(api_key, base_url)
            .map(|config| Self { embedding_model, completion_model, ..config })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        Url::parse(&base_url).map_err(|e| {
            Error::Configuration(format!("invalid base URL {}: {}", base_url, e))
        })?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            completion_model: "gpt-4o-mini".to_string(),
        })
    }
}
