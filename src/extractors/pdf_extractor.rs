//! PDF extractor that walks pages in document order.

use lopdf::Document;
use tracing::{debug, warn};

use super::base::ContentExtractor;
use crate::error::{ExtractError, Result};
use crate::types::{ExtractionMetadata, PdfExtractorConfig};

/// Extractor for PDF documents.
///
/// Text is extracted page by page and concatenated in page order. With the
/// default configuration nothing is inserted between pages and any page that
/// fails to extract fails the whole document.
pub struct PdfContentExtractor {
    config: PdfExtractorConfig,
}

impl PdfContentExtractor {
    /// Create a PDF extractor with the default settings.
    pub fn new() -> Self {
        Self::with_config(PdfExtractorConfig::default())
    }

    /// Create a PDF extractor with the given settings.
    pub fn with_config(config: PdfExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the extractor settings.
    pub fn config(&self) -> &PdfExtractorConfig {
        &self.config
    }
}

impl Default for PdfContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for PdfContentExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn description(&self) -> &'static str {
        "Extracts plain text from PDF documents page by page"
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["pdf"]
    }

    fn validate_config(&self) -> Result<()> {
        self.config.validate()
    }

    fn process(
        &self,
        file_content: &[u8],
        file_extension: &str,
        metadata: &ExtractionMetadata,
    ) -> Result<String> {
        let mut doc = Document::load_mem(file_content)
            .map_err(|e| ExtractError::Extraction(format!("failed to load PDF: {}", e)))?;

        // Owner-password-only documents open with an empty user password.
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                ExtractError::Extraction(format!("encrypted PDF requires a password: {}", e))
            })?;
        }

        let pages = doc.get_pages();
        debug!(
            extension = file_extension,
            bytes = file_content.len(),
            pages = pages.len(),
            filename = metadata.filename.as_deref().unwrap_or("-"),
            "Extracting PDF text"
        );

        let limit = self.config.max_pages.unwrap_or(usize::MAX);
        let page_texts = pages.keys().take(limit).map(|&page_num| {
            let text = doc.extract_text(&[page_num]).map_err(|e| e.to_string());
            (page_num, text)
        });

        join_pages(page_texts, &self.config)
    }
}

/// Concatenate per-page extraction results in the order given.
///
/// A failed page aborts with an error unless the configuration tolerates
/// page errors, in which case the page is skipped.
fn join_pages<I>(pages: I, config: &PdfExtractorConfig) -> Result<String>
where
    I: IntoIterator<Item = (u32, std::result::Result<String, String>)>,
{
    let mut text = String::new();
    let mut emitted = 0usize;

    for (page_num, result) in pages {
        match result {
            Ok(page_text) => {
                if emitted > 0 {
                    text.push_str(&config.page_separator);
                }
                text.push_str(&page_text);
                emitted += 1;
            }
            Err(e) if config.tolerate_page_errors => {
                warn!(page = page_num, error = %e, "Skipping page that failed to extract");
            }
            Err(e) => {
                return Err(ExtractError::Extraction(format!(
                    "document is corrupt: page {} could not be extracted: {}",
                    page_num, e
                )));
            }
        }
    }

    Ok(text)
}
