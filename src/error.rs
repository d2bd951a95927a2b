//! Error types for extraction.

use thiserror::Error;

/// Errors raised while validating, dispatching or running an extractor.
///
/// Every variant is terminal for the request in flight; callers surface it
/// as a failed [`ChunkingResponse`](crate::types::ChunkingResponse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Extractor or chunking configuration is malformed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Content could not be parsed in the declared format
    #[error("extraction error: {0}")]
    Extraction(String),

    /// No extractor is registered for the file extension
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
