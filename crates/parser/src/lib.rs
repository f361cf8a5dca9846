//! OpenAPI parsing for endpoint-extractor
//!
//! Loads an OpenAPI document and flattens every path/method pair into an
//! [`Endpoint`](endpoint_extractor_common::Endpoint).

pub mod openapi;

pub use openapi::{Extraction, OpenApiParser};

use endpoint_extractor_common::Result;
use std::path::Path;

/// Load a spec file and extract its endpoints
pub fn extract_from_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let parser = OpenApiParser::from_file(path)?;
    Ok(parser.extract())
}
