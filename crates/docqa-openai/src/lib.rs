//! OpenAI-compatible embedding and completion client for docqa
//!
//! This crate provides the hosted implementation of the `Embedder` and
//! `CompletionProvider` traits, speaking the OpenAI HTTP API shape.

mod client;
mod config;


pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use docqa_core::{CompletionProvider, Embedder, Error, Result};
