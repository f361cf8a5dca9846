//! OpenAPI specification parser
//!
//! Parses OpenAPI 3.x and Swagger 2.0 documents (YAML or JSON) and flattens
//! their paths into [`Endpoint`](endpoint_extractor_common::Endpoint) records.
//!
//! ## Extraction
//! - Paths and methods are visited in document order
//! - Only `get`, `post`, `put`, `patch`, `delete`, `head` and `options`
//!   keys are operations
//! - Parameters given as `$ref` are skipped, not resolved
//!
//! ## Usage
//! ```rust,ignore
//! use endpoint_extractor_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("DigitalOcean-public.v2.yaml")?;
//! let extraction = parser.extract();
//! println!("Found {} endpoints", extraction.endpoints.len());
//! ```

mod extractor;
mod parser;
mod types;

pub use extractor::{extract_endpoints, Extraction};
pub use parser::OpenApiParser;
pub use types::*;
