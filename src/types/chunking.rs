//! Chunking request/response contract handed to the downstream chunker.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::DEFAULT_MAX_TOKENS;

/// Configuration describing how extracted text should be chunked.
///
/// The chunker itself lives downstream; this type only carries the caller's
/// choices and checks that they are coherent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Name of the splitting algorithm to apply (e.g. "token", "sentence")
    pub chunking_strategy: String,

    /// Upper bound on chunk size in tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,

    /// Tokens shared between consecutive chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_tokens: Option<usize>,
}

impl ChunkingConfig {
    /// Create a config for the given strategy with no token bounds.
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            chunking_strategy: strategy.into(),
            max_tokens: None,
            overlap_tokens: None,
        }
    }

    /// Set the maximum chunk size.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap_tokens: usize) -> Self {
        self.overlap_tokens = Some(overlap_tokens);
        self
    }

    /// The chunk size the downstream chunker will use.
    pub fn effective_max_tokens(&self) -> usize {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Check the config for internal consistency.
    ///
    /// Overlap must stay strictly below the effective maximum, otherwise a
    /// chunker could never make forward progress.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.chunking_strategy.trim().is_empty() {
            return Err(ExtractError::Configuration(
                "chunking_strategy must not be empty".to_string(),
            ));
        }

        if self.max_tokens == Some(0) {
            return Err(ExtractError::Configuration(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        if let Some(overlap) = self.overlap_tokens {
            let max = self.effective_max_tokens();
            if overlap >= max {
                return Err(ExtractError::Configuration(format!(
                    "overlap_tokens ({}) must be less than max_tokens ({})",
                    overlap, max
                )));
            }
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(crate::DEFAULT_CHUNKING_STRATEGY)
    }
}

/// Extracted text paired with the configuration to chunk it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingRequest {
    /// Plain text produced by an extractor
    pub extracted_text: String,

    /// How the text should be chunked
    pub config: ChunkingConfig,
}

impl ChunkingRequest {
    /// Build a request, rejecting an inconsistent config.
    pub fn new(extracted_text: String, config: ChunkingConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self {
            extracted_text,
            config,
        })
    }
}

/// Outcome of a chunking (or extraction) attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::Ok => write!(f, "ok"),
            ResponseStatus::Error => write!(f, "error"),
        }
    }
}

/// Response returned by the downstream chunker, or by this service when a
/// request fails before it reaches the chunker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingResponse {
    pub status: ResponseStatus,

    /// Chunks in document order; always empty on failure
    #[serde(default)]
    pub chunks: Vec<String>,

    /// Failure description; present only when status is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChunkingResponse {
    /// A successful response carrying the given chunks.
    ///
    /// A successful response must carry at least one chunk; passing an empty
    /// vector yields a value that fails [`ChunkingResponse::is_consistent`].
    pub fn ok(chunks: Vec<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            chunks,
            error: None,
        }
    }

    /// A failed response. A blank message is replaced so the error field is
    /// never empty.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };

        Self {
            status: ResponseStatus::Error,
            chunks: Vec::new(),
            error: Some(message),
        }
    }

    /// Check whether this response is a failure.
    pub fn is_error(&self) -> bool {
        self.status == ResponseStatus::Error
    }

    /// Check the status/error/chunks invariant.
    ///
    /// A response is an error exactly when it carries a non-empty error
    /// message, and exactly when it carries no chunks.
    /// [`ChunkingResponse::error`] always passes; values deserialized from a
    /// peer may not.
    pub fn is_consistent(&self) -> bool {
        let has_error = self.error.as_deref().is_some_and(|e| !e.trim().is_empty());
        match self.status {
            ResponseStatus::Error => has_error && self.chunks.is_empty(),
            ResponseStatus::Ok => !has_error && !self.chunks.is_empty(),
        }
    }
}

impl From<&ExtractError> for ChunkingResponse {
    fn from(err: &ExtractError) -> Self {
        Self::error(err.to_string())
    }
}

impl From<ExtractError> for ChunkingResponse {
    fn from(err: ExtractError) -> Self {
        Self::from(&err)
    }
}
