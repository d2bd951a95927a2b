//! Extraction Service Library
//!
//! Extracts plain text from uploaded documents (PDF, JSON) and packages it
//! as a chunking request for a downstream chunker.

pub mod api;
pub mod error;
pub mod extractors;
pub mod router;
pub mod tokens;
pub mod types;

pub use error::ExtractError;
pub use extractors::{ContentExtractor, JsonContentExtractor, PdfContentExtractor};
pub use router::{ExtractedText, ExtractionRouter};
pub use types::{
    ChunkingConfig, ChunkingRequest, ChunkingResponse, ExtractionMetadata, ResponseStatus,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ExtractError;
    pub use crate::extractors::*;
    pub use crate::router::*;
    pub use crate::types::*;
}

/// Chunk size assumed when a chunking config sets none
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Strategy named when a request does not pick one
pub const DEFAULT_CHUNKING_STRATEGY: &str = "token";

/// Indentation used for re-serialized JSON
pub const DEFAULT_JSON_INDENT: &str = "    ";

/// Maximum accepted upload size (10MB)
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 10 * 1024 * 1024;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3018;
