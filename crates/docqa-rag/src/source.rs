//! Plain-text document source

use docqa_core::{DocumentSource, Error, ExtractOptions, Result};

/// Paragraph extraction for plain-text documents.
///
/// Lines at least `min_line_length` long are joined into the current
/// paragraph; shorter lines (headings, page furniture, blanks) flush it.
/// A line ending in `-` continues its word into the next line. Form feeds
/// delimit pages, so the page range in [`ExtractOptions`] keeps its
/// meaning for text produced by print-oriented tools.
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }

    fn collect_paragraphs(text: &str, min_line_length: usize, out: &mut Vec<String>) {
        let mut buffer = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.chars().count() >= min_line_length {
                if let Some(stem) = buffer.strip_suffix('-') {
                    buffer = format!("{}{}", stem, line);
                } else {
                    if !buffer.is_empty() {
                        buffer.push(' ');
                    }
                    buffer.push_str(line);
                }
            } else if !buffer.is_empty() {
                out.push(std::mem::take(&mut buffer));
            }
        }

        if !buffer.is_empty() {
            out.push(buffer);
        }
    }
}

impl Default for PlainTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for PlainTextSource {
    fn paragraphs(&self, bytes: &[u8], options: &ExtractOptions) -> Result<Vec<String>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Source(format!("document is not valid UTF-8: {}", e)))?;

        let pages: Vec<&str> = text.split('\u{000C}').collect();
        let selected: &[&str] = match options.pages {
            Some((start, end)) => pages.get(start..=end).ok_or_else(|| {
                Error::Source(format!(
                    "page range {}-{} out of bounds for {} pages",
                    start,
                    end,
                    pages.len()
                ))
            })?,
            None => &pages,
        };

        let mut paragraphs = Vec::new();
        for page in selected {
            Self::collect_paragraphs(page, options.min_line_length, &mut paragraphs);
        }

        Ok(paragraphs)
    }
}
