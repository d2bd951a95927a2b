//! Content extractors for the supported document formats.

mod base;
mod json_extractor;
mod pdf_extractor;

pub use base::{normalize_extension, ContentExtractor};
pub use json_extractor::{format_value, JsonContentExtractor};
pub use pdf_extractor::PdfContentExtractor;
