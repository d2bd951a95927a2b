//! JSON extractor that re-serializes documents into a canonical indented form.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::debug;

use super::base::ContentExtractor;
use crate::error::{ExtractError, Result};
use crate::types::{ExtractionMetadata, JsonExtractorConfig};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extractor for JSON documents.
///
/// The text of a JSON document is the document itself, pretty-printed with a
/// fixed indent and keys kept in the order they were parsed. Formatting the
/// output again yields identical bytes.
pub struct JsonContentExtractor {
    config: JsonExtractorConfig,
}

impl JsonContentExtractor {
    /// Create a JSON extractor with the default four-space indent.
    pub fn new() -> Self {
        Self::with_config(JsonExtractorConfig::default())
    }

    /// Create a JSON extractor with the given settings.
    pub fn with_config(config: JsonExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the extractor settings.
    pub fn config(&self) -> &JsonExtractorConfig {
        &self.config
    }
}

impl Default for JsonContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for JsonContentExtractor {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Re-serializes JSON documents with stable indentation and key order"
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["json"]
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
        debug!(
            extension = file_extension,
            bytes = file_content.len(),
            filename = metadata.filename.as_deref().unwrap_or("-"),
            "Formatting JSON document"
        );

        let content = file_content.strip_prefix(UTF8_BOM).unwrap_or(file_content);

        let value: Value = serde_json::from_slice(content)
            .map_err(|e| ExtractError::Extraction(format!("malformed JSON: {}", e)))?;

        format_value(&value, &self.config.indent)
    }
}

/// Serialize a JSON value with the given per-level indent.
pub fn format_value(value: &Value, indent: &str) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| ExtractError::Extraction(format!("failed to serialize JSON: {}", e)))?;

    String::from_utf8(buf)
        .map_err(|e| ExtractError::Extraction(format!("serialized JSON is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(input: &str) -> Result<String> {
        JsonContentExtractor::new().process(input.as_bytes(), "json", &ExtractionMetadata::default())
    }

    #[test]
    fn test_formats_with_four_spaces() {
        let output = process(r#"{"a":1,"b":[2,3]}"#).unwrap();
        let expected = "{\n    \"a\": 1,\n    \"b\": [\n        2,\n        3\n    ]\n}";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_preserves_key_order() {
        let output = process(r#"{"zeta":1,"alpha":2,"mid":{"y":true,"x":null}}"#).unwrap();
        let zeta = output.find("zeta").unwrap();
        let alpha = output.find("alpha").unwrap();
        let y = output.find("\"y\"").unwrap();
        let x = output.find("\"x\"").unwrap();
        assert!(zeta < alpha);
        assert!(y < x);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let inputs = [
            r#"{"a":1,"b":[2,3]}"#,
            r#"[1.5, "two", {"three": [], "four": {}}]"#,
            r#""just a string""#,
            "42",
            r#"{"nested":{"deeper":{"deepest":[true,false,null]}}}"#,
        ];

        for input in inputs {
            let once = process(input).unwrap();
            let twice = process(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_numbers_keep_their_exact_text() {
        assert_eq!(
            process(r#"{"id":123456789012345678901234567890}"#).unwrap(),
            "{\n    \"id\": 123456789012345678901234567890\n}"
        );
        assert_eq!(process("[1e400]").unwrap(), "[\n    1e400\n]");
        assert_eq!(
            process("[0.10000000000000000000001]").unwrap(),
            "[\n    0.10000000000000000000001\n]"
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(process(r#"{"a":{},"b":[]}"#).unwrap(), "{\n    \"a\": {},\n    \"b\": []\n}");
    }

    #[test]
    fn test_malformed_input_fails() {
        for input in [r#"{"a":1,"b":[2,3]"#, "{'a': 1}", "", "[1,]"] {
            let result = process(input);
            assert!(
                matches!(result, Err(ExtractError::Extraction(_))),
                "expected extraction error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let result = JsonContentExtractor::new().process(
            b"{\"a\": \"\xff\"}",
            "json",
            &ExtractionMetadata::default(),
        );
        assert!(matches!(result, Err(ExtractError::Extraction(_))));
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let mut input = UTF8_BOM.to_vec();
        input.extend_from_slice(br#"{"a":1}"#);
        let output = JsonContentExtractor::new()
            .process(&input, "json", &ExtractionMetadata::default())
            .unwrap();
        assert_eq!(output, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_custom_indent() {
        let extractor = JsonContentExtractor::with_config(JsonExtractorConfig {
            indent: "\t".to_string(),
        });
        assert!(extractor.validate_config().is_ok());
        let output = extractor
            .process(br#"{"a":[1]}"#, "json", &ExtractionMetadata::default())
            .unwrap();
        assert_eq!(output, "{\n\t\"a\": [\n\t\t1\n\t]\n}");
    }

    #[test]
    fn test_supported_extensions() {
        let extractor = JsonContentExtractor::new();
        assert!(extractor.supports_extension(".JSON"));
        assert!(!extractor.supports_extension("pdf"));
    }

    #[test]
    fn test_invalid_indent_rejected() {
        let extractor = JsonContentExtractor::with_config(JsonExtractorConfig {
            indent: "xx".to_string(),
        });
        assert!(matches!(
            extractor.validate_config(),
            Err(ExtractError::Configuration(_))
        ));
    }
}
