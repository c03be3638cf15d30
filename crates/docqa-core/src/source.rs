//! Document source trait and types

use serde::{Deserialize, Serialize};

use crate::Result;

/// Options for paragraph extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Inclusive zero-based page range; `None` means the whole document
    pub pages: Option<(usize, usize)>,
    /// Lines shorter than this are dropped before paragraphs are assembled
    pub min_line_length: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            min_line_length: 10,
        }
    }
}

/// Trait for document sources
///
/// A document source turns raw document bytes into an ordered sequence of
/// paragraph-level strings ready for ingestion. Extraction is a pure
/// function of the bytes and the options; sources hold no per-document
/// state.
pub trait DocumentSource: Send + Sync {
    /// Extract ordered paragraphs from raw document bytes
    fn paragraphs(&self, bytes: &[u8], options: &ExtractOptions) -> Result<Vec<String>>;
}
