//! Extraction router keyed by file extension.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::extractors::{
    normalize_extension, ContentExtractor, JsonContentExtractor, PdfContentExtractor,
};
use crate::types::{ExtractionMetadata, ServiceConfig};

/// Router that selects the extractor for an uploaded document.
///
/// Extractors are registered under every extension they support. When the
/// caller does not declare an extension the router falls back to the
/// filename and then the content type in the metadata.
pub struct ExtractionRouter {
    /// Extractors in registration order
    extractors: Vec<Arc<dyn ContentExtractor>>,
    /// Normalized extension to index into `extractors`
    by_extension: HashMap<String, usize>,
}

impl ExtractionRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
            by_extension: HashMap::new(),
        }
    }

    /// Create a router with the PDF and JSON extractors configured from the
    /// service configuration.
    pub fn with_defaults(config: &ServiceConfig) -> Self {
        let mut router = Self::new();
        router.register(PdfContentExtractor::with_config(config.pdf.clone()));
        router.register(JsonContentExtractor::with_config(config.json.clone()));
        router
    }

    /// Register an extractor under all of its extensions.
    ///
    /// A later registration takes over extensions claimed by an earlier one.
    pub fn register<E: ContentExtractor + 'static>(&mut self, extractor: E) {
        let index = self.extractors.len();
        for ext in extractor.supported_extensions() {
            self.by_extension.insert(normalize_extension(ext), index);
        }
        info!(
            extractor = extractor.name(),
            extensions = ?extractor.supported_extensions(),
            "Registered extractor"
        );
        self.extractors.push(Arc::new(extractor));
    }

    /// Work out which extension to dispatch on.
    ///
    /// The declared extension wins; otherwise the filename suffix, then a
    /// known content type.
    pub fn resolve_extension(&self, file_extension: &str, metadata: &ExtractionMetadata) -> Option<String> {
        let declared = normalize_extension(file_extension);
        if !declared.is_empty() {
            return Some(declared);
        }

        if let Some(ext) = metadata.filename_extension() {
            return Some(normalize_extension(ext));
        }

        metadata
            .mime_essence()
            .and_then(extension_for_mime)
            .map(String::from)
    }

    /// Get the extractor for the given extension.
    pub fn get_extractor(&self, file_extension: &str) -> Result<Arc<dyn ContentExtractor>> {
        let ext = normalize_extension(file_extension);
        self.by_extension
            .get(&ext)
            .map(|&index| Arc::clone(&self.extractors[index]))
            .ok_or_else(|| {
                let shown = if ext.is_empty() { "<none>" } else { ext.as_str() };
                ExtractError::UnsupportedFormat(format!("no extractor for extension '{}'", shown))
            })
    }

    /// Extract text from a document: resolve the extractor, validate its
    /// configuration, then process the content.
    pub fn extract(
        &self,
        file_content: &[u8],
        file_extension: &str,
        metadata: &ExtractionMetadata,
    ) -> Result<ExtractedText> {
        let ext = self.resolve_extension(file_extension, metadata).unwrap_or_default();
        let extractor = self.get_extractor(&ext)?;

        extractor.validate_config()?;

        debug!(
            extractor = extractor.name(),
            extension = %ext,
            bytes = file_content.len(),
            "Dispatching extraction"
        );
        let text = extractor.process(file_content, &ext, metadata)?;

        Ok(ExtractedText {
            extractor: extractor.name(),
            file_extension: ext,
            text,
        })
    }

    /// List all registered extractors as (name, description, extensions).
    pub fn list_extractors(&self) -> Vec<(&'static str, &'static str, &'static [&'static str])> {
        self.extractors
            .iter()
            .map(|e| (e.name(), e.description(), e.supported_extensions()))
            .collect()
    }
}

impl Default for ExtractionRouter {
    fn default() -> Self {
        Self::with_defaults(&ServiceConfig::default())
    }
}

/// Text produced by a routed extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Name of the extractor that ran
    pub extractor: &'static str,
    /// Extension the document was dispatched on
    pub file_extension: String,
    /// The extracted text
    pub text: String,
}

fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime.to_ascii_lowercase().as_str() {
        "application/pdf" | "application/x-pdf" => Some("pdf"),
        "application/json" | "text/json" => Some("json"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JsonExtractorConfig;

    #[test]
    fn test_extension_routing() {
        let router = ExtractionRouter::default();
        assert_eq!(router.get_extractor("pdf").unwrap().name(), "pdf");
        assert_eq!(router.get_extractor(".JSON").unwrap().name(), "json");
    }

    #[test]
    fn test_unsupported_extension() {
        let router = ExtractionRouter::default();
        assert!(matches!(
            router.get_extractor("docx"),
            Err(ExtractError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            router.extract(b"data", "", &ExtractionMetadata::default()),
            Err(ExtractError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_resolve_extension_fallbacks() {
        let router = ExtractionRouter::default();

        let metadata = ExtractionMetadata::for_file("data.json").with_content_type("application/pdf");
        assert_eq!(router.resolve_extension("PDF", &metadata).as_deref(), Some("pdf"));
        assert_eq!(router.resolve_extension("", &metadata).as_deref(), Some("json"));

        let metadata = ExtractionMetadata::default().with_content_type("application/pdf; x=y");
        assert_eq!(router.resolve_extension("", &metadata).as_deref(), Some("pdf"));

        assert_eq!(router.resolve_extension("", &ExtractionMetadata::default()), None);
    }

    #[test]
    fn test_extract_json() {
        let router = ExtractionRouter::default();
        let result = router
            .extract(br#"{"a":1}"#, "json", &ExtractionMetadata::default())
            .unwrap();
        assert_eq!(result.extractor, "json");
        assert_eq!(result.file_extension, "json");
        assert_eq!(result.text, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_extract_uses_filename_when_extension_missing() {
        let router = ExtractionRouter::default();
        let result = router
            .extract(b"[1]", "", &ExtractionMetadata::for_file("list.json"))
            .unwrap();
        assert_eq!(result.extractor, "json");
    }

    #[test]
    fn test_extract_validates_config_first() {
        let config = ServiceConfig {
            json: JsonExtractorConfig {
                indent: "nope".to_string(),
            },
            ..Default::default()
        };
        let router = ExtractionRouter::with_defaults(&config);
        assert!(matches!(
            router.extract(b"{}", "json", &ExtractionMetadata::default()),
            Err(ExtractError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_content_is_extraction_error() {
        let router = ExtractionRouter::default();
        assert!(matches!(
            router.extract(b"{", "json", &ExtractionMetadata::default()),
            Err(ExtractError::Extraction(_))
        ));
        assert!(matches!(
            router.extract(b"not a pdf at all", "pdf", &ExtractionMetadata::default()),
            Err(ExtractError::Extraction(_))
        ));
    }

    #[test]
    fn test_list_extractors() {
        let router = ExtractionRouter::default();
        let names: Vec<_> = router.list_extractors().into_iter().map(|(n, _, _)| n).collect();
        assert_eq!(names, vec!["pdf", "json"]);
    }
}
