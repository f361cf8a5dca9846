//! Flattened endpoint records
//!
//! One [`Endpoint`] per (path, method) pair of an OpenAPI document. The
//! serialized shape is the on-disk format of the endpoints JSON file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods recognized as operations inside an OpenAPI path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// All recognized methods, in the order OpenAPI lists them
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Map a path item key to a method
    ///
    /// Only the lowercase keys are operations; anything else in a path item
    /// (`parameters`, `summary`, `$ref`, extensions) is not.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// Upper-case method name (e.g., "GET")
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Whether requests with this method carry a body
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation parameter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointParameter {
    pub name: String,

    /// Location: query, header, path, cookie (or body/formData for Swagger 2.0)
    #[serde(rename = "in")]
    pub location: String,

    pub required: bool,

    pub description: String,

    /// Primitive type name, empty when the document does not say
    #[serde(rename = "type")]
    pub param_type: String,
}

/// One flattened (path, method) entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,

    pub method: HttpMethod,

    #[serde(rename = "operationId")]
    pub operation_id: String,

    pub summary: String,

    pub description: String,

    pub tags: Vec<String>,

    pub parameters: Vec<EndpointParameter>,
}

impl Endpoint {
    /// Create an endpoint with empty metadata
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            operation_id: String::new(),
            summary: String::new(),
            description: String::new(),
            tags: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Whether the endpoint carries the given tag (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_key() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("options"), Some(HttpMethod::Options));
        assert_eq!(HttpMethod::from_key("GET"), None);
        assert_eq!(HttpMethod::from_key("trace"), None);
        assert_eq!(HttpMethod::from_key("parameters"), None);
        assert_eq!(HttpMethod::from_key("$ref"), None);
    }

    #[test]
    fn test_method_display_matches_serialization() {
        for method in HttpMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
        }
    }

    #[test]
    fn test_accepts_body() {
        assert!(HttpMethod::Post.accepts_body());
        assert!(HttpMethod::Patch.accepts_body());
        assert!(!HttpMethod::Get.accepts_body());
        assert!(!HttpMethod::Delete.accepts_body());
    }

    #[test]
    fn test_endpoint_serialized_keys() {
        let mut endpoint = Endpoint::new("/v2/droplets", HttpMethod::Get);
        endpoint.operation_id = "droplets_list".to_string();
        endpoint.parameters.push(EndpointParameter {
            name: "per_page".to_string(),
            location: "query".to_string(),
            required: false,
            description: String::new(),
            param_type: "integer".to_string(),
        });

        let value = serde_json::to_value(&endpoint).unwrap();
        assert_eq!(value["method"], "GET");
        assert_eq!(value["operationId"], "droplets_list");
        assert_eq!(value["parameters"][0]["in"], "query");
        assert_eq!(value["parameters"][0]["type"], "integer");

        let text = serde_json::to_string(&endpoint).unwrap();
        let keys = [
            "\"path\"",
            "\"method\"",
            "\"operationId\"",
            "\"summary\"",
            "\"description\"",
            "\"tags\"",
            "\"parameters\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
