//! Request planning for catalog endpoints
//!
//! Turns an endpoint plus a set of named argument values into the concrete
//! HTTP request a client would send. Nothing is sent from here.

use endpoint_extractor_common::{Endpoint, ExtractorError, HttpMethod, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Characters left alone by JavaScript's `encodeURIComponent`
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A planned HTTP request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPlan {
    pub method: HttpMethod,

    /// Base URL joined with the substituted path, without query string
    pub url: String,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub query: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Map<String, Value>>,

    /// Path placeholders that had no value
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_path_params: Vec<String>,
}

impl RequestPlan {
    /// Plan a request for `endpoint` against `base_url`
    pub fn build(endpoint: &Endpoint, base_url: &str, params: &Map<String, Value>) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ExtractorError::Request(
                "A base URL is required to plan a request".to_string(),
            ));
        }

        let path = substitute_path(&endpoint.path, params);
        let missing_path_params = missing_placeholders(&path, params);

        let mut query = Map::new();
        let mut body = Map::new();
        for param in &endpoint.parameters {
            let Some(value) = params.get(&param.name) else {
                continue;
            };
            match param.location.as_str() {
                "query" => {
                    query.insert(param.name.clone(), value.clone());
                }
                "body" | "formData" => {
                    body.insert(param.name.clone(), value.clone());
                }
                _ => {}
            }
        }

        let body = if endpoint.method.accepts_body() && !body.is_empty() {
            Some(body)
        } else {
            None
        };

        let plan = Self {
            method: endpoint.method,
            url: format!("{}{}", base, path),
            query,
            body,
            missing_path_params,
        };
        debug!(operation_id = %endpoint.operation_id, url = %plan.url, "Planned request");
        Ok(plan)
    }

    /// URL including the encoded query string
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(name, value)| format!("{}={}", encode_component(name), encode_value(value)))
            .collect();
        format!("{}?{}", self.url, pairs.join("&"))
    }
}

/// Replace the first `{name}` occurrence for every provided argument
fn substitute_path(path: &str, params: &Map<String, Value>) -> String {
    let mut url = path.to_string();
    for (name, value) in params {
        let placeholder = format!("{{{}}}", name);
        if url.contains(&placeholder) {
            url = url.replacen(&placeholder, &encode_value(value), 1);
        }
    }
    url
}

/// Placeholders left in a substituted path that have no supplied value,
/// each listed once
fn missing_placeholders(path: &str, params: &Map<String, Value>) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in placeholders(path) {
        if !params.contains_key(&name) && !missing.contains(&name) {
            missing.push(name);
        }
    }
    missing
}

/// Names of `{...}` placeholders still present in a path
fn placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode_value(value: &Value) -> String {
    encode_component(&value_to_string(value))
}

fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT_ENCODE_SET).to_string()
}
