//! Flattens an OpenAPI document into endpoint records

use super::types::{OpenApiDocument, Operation, Parameter, ParameterOrRef};
use endpoint_extractor_common::{Endpoint, EndpointParameter, HttpMethod};
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

/// Result of flattening a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Endpoints in document order
    pub endpoints: Vec<Endpoint>,

    /// Parameters skipped because they were `$ref`s
    pub skipped_refs: usize,

    /// Method entries that were not usable operation objects
    pub skipped_operations: usize,

    /// Path entries that were not mappings
    pub skipped_paths: usize,

    /// The document had no `paths` section
    pub paths_missing: bool,
}

/// Extract every (path, method) endpoint from the document
pub fn extract_endpoints(doc: &OpenApiDocument) -> Extraction {
    let mut extraction = Extraction::default();

    let Some(paths) = &doc.paths else {
        extraction.paths_missing = true;
        return extraction;
    };

    for (key, path_item) in paths {
        let Some(path) = key.as_str() else {
            warn!(key = ?key, "Skipping non-string path key");
            extraction.skipped_paths += 1;
            continue;
        };

        let Some(path_item) = path_item.as_mapping() else {
            warn!(path, "Skipping path item that is not a mapping");
            extraction.skipped_paths += 1;
            continue;
        };

        extract_path_item(path, path_item, &mut extraction);
    }

    extraction
}

fn extract_path_item(path: &str, path_item: &Mapping, extraction: &mut Extraction) {
    for (key, value) in path_item {
        let Some(method) = key.as_str().and_then(HttpMethod::from_key) else {
            continue;
        };

        match parse_operation(value) {
            Some(operation) => {
                let endpoint =
                    build_endpoint(path, method, operation, &mut extraction.skipped_refs);
                extraction.endpoints.push(endpoint);
            }
            None => {
                warn!(path, method = %method, "Skipping malformed operation");
                extraction.skipped_operations += 1;
            }
        }
    }
}

fn parse_operation(value: &Value) -> Option<Operation> {
    if !value.is_mapping() {
        return None;
    }

    match serde_yaml::from_value(value.clone()) {
        Ok(operation) => Some(operation),
        Err(e) => {
            debug!(error = %e, "Operation did not match the expected shape");
            None
        }
    }
}

fn build_endpoint(
    path: &str,
    method: HttpMethod,
    operation: Operation,
    skipped_refs: &mut usize,
) -> Endpoint {
    let mut parameters = Vec::with_capacity(operation.parameters.len());
    for param in operation.parameters {
        match param {
            ParameterOrRef::Reference { ref_path } => {
                debug!(path, method = %method, reference = %ref_path, "Skipping $ref parameter");
                *skipped_refs += 1;
            }
            ParameterOrRef::Inline(param) => parameters.push(convert_parameter(*param)),
        }
    }

    Endpoint {
        path: path.to_string(),
        method,
        operation_id: operation.operation_id.unwrap_or_default(),
        summary: operation.summary.unwrap_or_default(),
        description: operation
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        tags: operation.tags,
        parameters,
    }
}

fn convert_parameter(param: Parameter) -> EndpointParameter {
    let param_type = param.type_name().to_string();
    EndpointParameter {
        name: param.name.unwrap_or_default(),
        location: param.location.unwrap_or_default(),
        required: param.required.unwrap_or(false),
        description: param.description.unwrap_or_default(),
        param_type,
    }
}
