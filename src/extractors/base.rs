//! Base trait for all content extractors.

use crate::error::Result;
use crate::types::ExtractionMetadata;

/// The core trait that all extractors must implement.
///
/// An extractor takes the raw bytes of an uploaded document in one format
/// and turns them into plain text suitable for chunking.
pub trait ContentExtractor: Send + Sync {
    /// Get the name of this extractor.
    fn name(&self) -> &'static str;

    /// File extensions (lowercase, without the dot) this extractor handles.
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Check the extractor-specific configuration.
    ///
    /// # Errors
    /// Returns [`ExtractError::Configuration`](crate::ExtractError::Configuration)
    /// when the configuration is malformed.
    fn validate_config(&self) -> Result<()>;

    /// Extract plain text from the given content.
    ///
    /// # Arguments
    /// * `file_content` - Raw document bytes
    /// * `file_extension` - Declared extension of the document
    /// * `metadata` - Caller-supplied hints about the upload
    ///
    /// # Returns
    /// The extracted text. Fails with
    /// [`ExtractError::Extraction`](crate::ExtractError::Extraction) when the
    /// content cannot be parsed in the declared format.
    fn process(
        &self,
        file_content: &[u8],
        file_extension: &str,
        metadata: &ExtractionMetadata,
    ) -> Result<String>;

    /// Check if this extractor handles the given extension.
    fn supports_extension(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        self.supported_extensions().iter().any(|e| *e == extension)
    }

    /// Get the description of this extractor.
    fn description(&self) -> &'static str {
        "A content extractor"
    }
}

/// Lowercase an extension and strip any leading dots.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".PDF"), "pdf");
        assert_eq!(normalize_extension(" json "), "json");
        assert_eq!(normalize_extension(""), "");
    }
}
