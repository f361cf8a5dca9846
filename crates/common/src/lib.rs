//! Common types and utilities for endpoint-extractor
//!
//! This crate contains the flattened endpoint records and the error type
//! shared by the parser, catalog, and CLI components.

mod endpoint;

pub use endpoint::{Endpoint, EndpointParameter, HttpMethod};

use thiserror::Error;

/// Errors that can occur while extracting or querying endpoints
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for extractor operations
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractorError::NotFound("listDroplets".to_string());
        assert_eq!(err.to_string(), "Not found: listDroplets");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ExtractorError = io.into();
        assert!(err.to_string().starts_with("IO error:"));
    }
}
