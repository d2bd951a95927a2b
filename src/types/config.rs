//! Configuration types for the service and its extractors.

use serde::{Deserialize, Serialize};

use super::ChunkingConfig;
use crate::error::ExtractError;
use crate::{
    DEFAULT_CHUNKING_STRATEGY, DEFAULT_JSON_INDENT, DEFAULT_MAX_CONTENT_SIZE, DEFAULT_PORT,
};

/// Longest accepted indent or page separator.
const MAX_FILLER_LEN: usize = 16;

/// Global service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Port the HTTP server listens on
    pub port: u16,

    /// Largest accepted upload in bytes
    pub max_content_size: usize,

    /// Strategy used when a request does not name one
    pub default_chunking_strategy: String,

    /// Max tokens used when a request does not set one
    pub default_max_tokens: Option<usize>,

    /// Overlap used when a request does not set one
    pub default_overlap_tokens: Option<usize>,

    /// PDF extractor settings
    pub pdf: PdfExtractorConfig,

    /// JSON extractor settings
    pub json: JsonExtractorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
            default_chunking_strategy: DEFAULT_CHUNKING_STRATEGY.to_string(),
            default_max_tokens: None,
            default_overlap_tokens: None,
            pdf: PdfExtractorConfig::default(),
            json: JsonExtractorConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            max_content_size: std::env::var("MAX_CONTENT_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_SIZE),
            default_chunking_strategy: std::env::var("CHUNKING_STRATEGY")
                .unwrap_or_else(|_| DEFAULT_CHUNKING_STRATEGY.to_string()),
            default_max_tokens: std::env::var("MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok()),
            default_overlap_tokens: std::env::var("OVERLAP_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok()),
            pdf: PdfExtractorConfig {
                tolerate_page_errors: std::env::var("PDF_TOLERATE_PAGE_ERRORS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(false),
                page_separator: std::env::var("PDF_PAGE_SEPARATOR").unwrap_or_default(),
                max_pages: std::env::var("PDF_MAX_PAGES")
                    .ok()
                    .and_then(|s| s.parse().ok()),
            },
            json: JsonExtractorConfig {
                indent: std::env::var("JSON_INDENT")
                    .unwrap_or_else(|_| DEFAULT_JSON_INDENT.to_string()),
            },
        }
    }

    /// Chunking config applied to requests that do not override it.
    pub fn default_chunking_config(&self) -> ChunkingConfig {
        ChunkingConfig {
            chunking_strategy: self.default_chunking_strategy.clone(),
            max_tokens: self.default_max_tokens,
            overlap_tokens: self.default_overlap_tokens,
        }
    }

    /// Check every setting that is fixed at startup.
    pub fn validate(&self) -> Result<(), ExtractError> {
        self.default_chunking_config().validate()?;
        self.pdf.validate()?;
        self.json.validate()
    }
}

/// Settings for the PDF extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfExtractorConfig {
    /// Skip pages whose text cannot be extracted instead of failing
    #[serde(default)]
    pub tolerate_page_errors: bool,

    /// Inserted between consecutive pages; empty by default
    #[serde(default)]
    pub page_separator: String,

    /// Stop after this many pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

impl PdfExtractorConfig {
    /// Check the settings.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.max_pages == Some(0) {
            return Err(ExtractError::Configuration(
                "pdf max_pages must be greater than zero".to_string(),
            ));
        }

        if self.page_separator.chars().count() > MAX_FILLER_LEN {
            return Err(ExtractError::Configuration(format!(
                "pdf page_separator is longer than {} characters",
                MAX_FILLER_LEN
            )));
        }

        Ok(())
    }
}

/// Settings for the JSON extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExtractorConfig {
    /// Indentation used per nesting level
    pub indent: String,
}

impl Default for JsonExtractorConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_JSON_INDENT.to_string(),
        }
    }
}

impl JsonExtractorConfig {
    /// Check the settings.
    ///
    /// Only spaces and tabs keep the output valid JSON.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if let Some(c) = self.indent.chars().find(|c| *c != ' ' && *c != '\t') {
            return Err(ExtractError::Configuration(format!(
                "json indent may only contain spaces or tabs, found {:?}",
                c
            )));
        }

        if self.indent.len() > MAX_FILLER_LEN {
            return Err(ExtractError::Configuration(format!(
                "json indent is longer than {} characters",
                MAX_FILLER_LEN
            )));
        }

        Ok(())
    }
}
