//! Endpoint catalog for endpoint-extractor
//!
//! This crate owns the extracted endpoints file: writing it, loading it
//! back, and answering queries over it (lookup by operation id, text search,
//! tag filtering). It also plans HTTP requests for catalog entries and
//! renders endpoints as console text.

mod render;
mod request;
mod templates;

pub use render::{ConsoleRenderer, DEFAULT_SAMPLE_SIZE};
pub use request::RequestPlan;

use endpoint_extractor_common::{Endpoint, ExtractorError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default file name for extracted endpoints
pub const DEFAULT_ENDPOINTS_FILE: &str = "endpoints.json";

/// Write endpoints as indented JSON
pub fn save_endpoints(path: &Path, endpoints: &[Endpoint]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExtractorError::Output(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let json = serde_json::to_string_pretty(endpoints)?;
    fs::write(path, json).map_err(|e| {
        ExtractorError::Output(format!("Failed to write {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), count = endpoints.len(), "Saved endpoints");
    Ok(())
}

/// Queryable view over an extracted endpoints file
#[derive(Debug, Clone, Default)]
pub struct EndpointCatalog {
    endpoints: Vec<Endpoint>,
}

impl EndpointCatalog {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Load a catalog from an endpoints JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractorError::Parse(format!(
                "Failed to read endpoints file {}: {}",
                path.display(),
                e
            ))
        })?;

        let endpoints: Vec<Endpoint> = serde_json::from_str(&content).map_err(|e| {
            ExtractorError::Parse(format!(
                "Failed to parse endpoints file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), count = endpoints.len(), "Loaded endpoint catalog");
        Ok(Self::new(endpoints))
    }

    /// Load a catalog from endpoints JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let endpoints: Vec<Endpoint> = serde_json::from_str(json)
            .map_err(|e| ExtractorError::Parse(format!("Failed to parse endpoints JSON: {}", e)))?;
        Ok(Self::new(endpoints))
    }

    /// Every endpoint, in file order
    pub fn all(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// First endpoint with exactly this operation id
    pub fn find(&self, operation_id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|ep| ep.operation_id == operation_id)
    }

    /// Like [`find`](Self::find), but a missing endpoint is an error
    pub fn require(&self, operation_id: &str) -> Result<&Endpoint> {
        self.find(operation_id).ok_or_else(|| {
            ExtractorError::NotFound(format!("Endpoint not found: {}", operation_id))
        })
    }

    /// Case-insensitive substring search over operation id, summary,
    /// description and tags
    pub fn search(&self, query: &str) -> Vec<&Endpoint> {
        let query = query.to_lowercase();
        self.endpoints
            .iter()
            .filter(|ep| {
                ep.operation_id.to_lowercase().contains(&query)
                    || ep.summary.to_lowercase().contains(&query)
                    || ep.description.to_lowercase().contains(&query)
                    || ep.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Endpoints carrying `tag` (exact match)
    pub fn by_tag(&self, tag: &str) -> Vec<&Endpoint> {
        self.endpoints.iter().filter(|ep| ep.has_tag(tag)).collect()
    }

    /// Distinct tags, sorted
    pub fn tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .endpoints
            .iter()
            .flat_map(|ep| ep.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(String::from).collect()
    }
}
