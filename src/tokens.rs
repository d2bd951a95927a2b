//! Token counting for extracted text.
//!
//! Lets callers size `max_tokens` against the text they are about to send
//! to the chunker. Counts use the cl100k_base encoding (GPT-4/ChatGPT,
//! text-embedding-ada-002).

use anyhow::Result;
use tracing::warn;

/// Token counter backed by a tiktoken encoding.
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Create a counter with the cl100k_base encoding.
    pub fn new() -> Result<Self> {
        Self::with_encoding("cl100k_base")
    }

    /// Create a counter with a specific encoding.
    pub fn with_encoding(encoding_name: &str) -> Result<Self> {
        let bpe = match encoding_name {
            "cl100k_base" => tiktoken_rs::cl100k_base()?,
            "p50k_base" => tiktoken_rs::p50k_base()?,
            "r50k_base" => tiktoken_rs::r50k_base()?,
            other => anyhow::bail!("unknown encoding: {}", other),
        };
        Ok(Self { bpe })
    }

    /// Count the number of tokens in the given text.
    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Rough estimate used when no encoding could be loaded.
fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Count tokens using the shared default counter.
pub fn count_tokens(text: &str) -> usize {
    lazy_static::lazy_static! {
        static ref COUNTER: Option<TiktokenCounter> = match TiktokenCounter::new() {
            Ok(counter) => Some(counter),
            Err(e) => {
                warn!(error = %e, "Failed to load cl100k_base, falling back to estimates");
                None
            }
        };
    }

    match COUNTER.as_ref() {
        Some(counter) => counter.count_tokens(text),
        None => estimate_tokens(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_tokens() {
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn test_counts_grow_with_text() {
        let short = count_tokens("Hello, world!");
        let long = count_tokens(&"Hello, world! ".repeat(20));
        assert!(short > 0);
        assert!(long > short);
    }

    #[test]
    fn test_unknown_encoding() {
        assert!(TiktokenCounter::with_encoding("nope").is_err());
    }

    #[test]
    fn test_estimate() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcde"), 2);
    }
}
