//! Caller-supplied metadata accompanying content to extract.

use serde::{Deserialize, Serialize};

/// Auxiliary information about an uploaded document.
///
/// Extractors treat this as hints only; the bytes are always authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Original file name of the upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// MIME type reported by the client (e.g. "application/pdf")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Additional arbitrary metadata
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExtractionMetadata {
    /// Create metadata for a named file.
    pub fn for_file(filename: &str) -> Self {
        Self {
            filename: Some(filename.to_string()),
            ..Default::default()
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Extension taken from the file name, if it has one.
    pub fn filename_extension(&self) -> Option<&str> {
        let name = self.filename.as_deref()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext)
    }

    /// Content type without parameters such as `; charset=utf-8`.
    pub fn mime_essence(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
            .filter(|ct| !ct.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_extension() {
        assert_eq!(ExtractionMetadata::for_file("report.PDF").filename_extension(), Some("PDF"));
        assert_eq!(ExtractionMetadata::for_file("a.tar.json").filename_extension(), Some("json"));
        assert_eq!(ExtractionMetadata::for_file(".hidden").filename_extension(), None);
        assert_eq!(ExtractionMetadata::for_file("README").filename_extension(), None);
        assert_eq!(ExtractionMetadata::default().filename_extension(), None);
    }

    #[test]
    fn test_mime_essence() {
        let metadata = ExtractionMetadata::default().with_content_type("application/json; charset=utf-8");
        assert_eq!(metadata.mime_essence(), Some("application/json"));
        assert_eq!(ExtractionMetadata::default().mime_essence(), None);
    }
}
