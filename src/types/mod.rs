//! Core types for the extraction service.

mod chunking;
mod config;
mod metadata;

pub use chunking::{ChunkingConfig, ChunkingRequest, ChunkingResponse, ResponseStatus};
pub use config::{JsonExtractorConfig, PdfExtractorConfig, ServiceConfig};
pub use metadata::ExtractionMetadata;
