//! OpenAPI spec file parser

use super::extractor::{extract_endpoints, Extraction};
use super::types::OpenApiDocument;
use endpoint_extractor_common::{ExtractorError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// OpenAPI specification parser
///
/// Reads OpenAPI 3.x or Swagger 2.0 documents written in YAML or JSON.
pub struct OpenApiParser {
    /// Loaded OpenAPI document
    document: OpenApiDocument,
}

impl OpenApiParser {
    /// Load an OpenAPI document from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("DigitalOcean-public.v2.yaml")?;
    /// let extraction = parser.extract();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ExtractorError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        debug!(path = %path.as_ref().display(), bytes = content.len(), "Read OpenAPI file");
        Self::from_yaml(&content)
    }

    /// Parse an OpenAPI document from YAML (or JSON) text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let mut value: Value = serde_yaml::from_str(text)
            .map_err(|e| ExtractorError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;

        // `<<: *anchor` merge keys are not applied by the YAML loader itself
        value.apply_merge().map_err(|e| {
            ExtractorError::Parse(format!("Failed to apply YAML merge keys: {}", e))
        })?;

        match value {
            Value::Mapping(_) => {}
            Value::Null => {
                return Err(ExtractorError::Parse("OpenAPI document is empty".to_string()))
            }
            _ => {
                return Err(ExtractorError::Parse(
                    "OpenAPI document must be a mapping at the top level".to_string(),
                ))
            }
        }

        let document: OpenApiDocument = serde_yaml::from_value(value).map_err(|e| {
            ExtractorError::Parse(format!("Failed to read OpenAPI document: {}", e))
        })?;

        debug!(
            version = document.spec_version().unwrap_or("unknown"),
            title = document.title().unwrap_or(""),
            "Parsed OpenAPI document"
        );

        Ok(Self { document })
    }

    /// Flatten the document into endpoint records
    pub fn extract(&self) -> Extraction {
        extract_endpoints(&self.document)
    }

    /// Get reference to the underlying document
    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_openapi() {
        let yaml = r#"
openapi: "3.0.0"
info:
  title: Test API
  version: 1.0.0
paths: {}
"#;

        let parser = OpenApiParser::from_yaml(yaml);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.document().spec_version(), Some("3.0.0"));
        assert_eq!(parser.document().title(), Some("Test API"));
        assert!(parser.extract().endpoints.is_empty());
        assert!(!parser.extract().paths_missing);
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{"openapi": "3.0.0", "paths": {"/ping": {"get": {"operationId": "ping"}}}}"#;
        let parser = OpenApiParser::from_yaml(json).unwrap();
        assert_eq!(parser.extract().endpoints[0].operation_id, "ping");
    }

    #[test]
    fn test_reject_empty_and_scalar_documents() {
        assert!(matches!(
            OpenApiParser::from_yaml(""),
            Err(ExtractorError::Parse(_))
        ));
        assert!(matches!(
            OpenApiParser::from_yaml("- just\n- a list\n"),
            Err(ExtractorError::Parse(_))
        ));
        assert!(matches!(
            OpenApiParser::from_yaml("paths: [unclosed"),
            Err(ExtractorError::Parse(_))
        ));
    }

    #[test]
    fn test_merge_keys_applied() {
        let yaml = r#"
openapi: 3.0.0
x-common: &common
  summary: Shared summary
  tags: [Shared]
paths:
  /a:
    get:
      <<: *common
      operationId: a_get
    post:
      <<: *common
      summary: Own summary
"#;
        let extraction = OpenApiParser::from_yaml(yaml).unwrap().extract();
        let get = &extraction.endpoints[0];
        assert_eq!(get.operation_id, "a_get");
        assert_eq!(get.summary, "Shared summary");
        assert_eq!(get.tags, vec!["Shared".to_string()]);

        let post = &extraction.endpoints[1];
        assert_eq!(post.summary, "Own summary");
        assert_eq!(post.tags, vec!["Shared".to_string()]);
    }
}
