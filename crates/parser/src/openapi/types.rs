//! OpenAPI type definitions
//!
//! Deliberately loose: only the fields endpoint extraction reads are typed,
//! unknown keys are ignored, and `null` is treated like a missing value.
//! Paths stay a raw YAML mapping so document order survives.

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// OpenAPI (or Swagger 2.0) document root
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version (e.g., "3.0.0")
    #[serde(default, deserialize_with = "scalar_string")]
    pub openapi: Option<String>,

    /// Swagger version for 2.0 documents
    #[serde(default, deserialize_with = "scalar_string")]
    pub swagger: Option<String>,

    /// API metadata
    #[serde(default)]
    pub info: Option<Info>,

    /// API paths, in document order
    #[serde(default)]
    pub paths: Option<Mapping>,
}

/// API information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
}

/// HTTP operation
///
/// String fields accept any YAML scalar, so `operationId: 404` or
/// `summary: 2024` read as text instead of rejecting the operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default, deserialize_with = "scalar_string")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,

    /// Tags (for grouping)
    #[serde(default, deserialize_with = "scalar_strings")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<ParameterOrRef>,
}

/// Parameter or reference
///
/// Any parameter mapping carrying a `$ref` key is a reference, whatever the
/// key's value.
#[derive(Debug, Clone)]
pub enum ParameterOrRef {
    /// Reference to a shared parameter (`#/components/parameters/...`)
    Reference { ref_path: String },

    /// Inline parameter
    Inline(Box<Parameter>),
}

impl<'de> Deserialize<'de> for ParameterOrRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Some(ref_value) = value.get("$ref") {
            let ref_path = scalar_to_string(ref_value).unwrap_or_default();
            return Ok(ParameterOrRef::Reference { ref_path });
        }

        Parameter::deserialize(value)
            .map(|param| ParameterOrRef::Inline(Box::new(param)))
            .map_err(serde::de::Error::custom)
    }
}

/// Parameter definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    /// Location: query, header, path, cookie (body, formData in Swagger 2.0)
    #[serde(rename = "in")]
    #[serde(default, deserialize_with = "scalar_string")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "loose_bool")]
    pub required: Option<bool>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,

    /// OpenAPI 3.x schema
    #[serde(default)]
    pub schema: Option<Schema>,

    /// Swagger 2.0 inline type
    #[serde(rename = "type")]
    #[serde(default)]
    pub param_type: Option<TypeName>,
}

/// The part of a parameter schema we read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<TypeName>,
}

/// `type` is a single name, or a list of names in OpenAPI 3.1
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeName {
    Single(String),
    Union(Vec<String>),
}

impl TypeName {
    /// Primary type name: the first entry of a union that is not "null"
    pub fn primary(&self) -> &str {
        match self {
            TypeName::Single(name) => name,
            TypeName::Union(names) => names
                .iter()
                .find(|n| n.as_str() != "null")
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

impl Parameter {
    /// Resolve the parameter type
    ///
    /// A present `schema` wins even when it has no `type` (e.g. a schema
    /// `$ref`); only schema-less parameters fall back to the inline `type`.
    pub fn type_name(&self) -> &str {
        match &self.schema {
            Some(schema) => schema.schema_type.as_ref().map_or("", TypeName::primary),
            None => self.param_type.as_ref().map_or("", TypeName::primary),
        }
    }
}

impl OpenApiDocument {
    /// Version string from `openapi` or `swagger`, whichever is present
    pub fn spec_version(&self) -> Option<&str> {
        self.openapi.as_deref().or(self.swagger.as_deref())
    }

    /// API title from the info block
    pub fn title(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.title.as_deref())
    }
}

/// Accept `null` wherever a collection is expected
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a scalar as a string; unquoted `3.0` or `2.0` parse as numbers in YAML
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// A list of scalars as strings; `null` is an empty list
fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .filter_map(scalar_to_string)
        .collect())
}

/// A boolean, also accepting YAML 1.1 spellings such as `yes` and `off`
fn loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "y" => Some(true),
            "false" | "no" | "off" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
