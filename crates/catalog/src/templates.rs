//! Template loading and management

use endpoint_extractor_common::{ExtractorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Load all console templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("requirement", requirement_filter);

    tera.add_raw_template("sample", include_str!("../templates/sample.txt.tera"))
        .map_err(|e| ExtractorError::Render(format!("Failed to load sample template: {}", e)))?;

    tera.add_raw_template("listing", include_str!("../templates/listing.txt.tera"))
        .map_err(|e| ExtractorError::Render(format!("Failed to load listing template: {}", e)))?;

    tera.add_raw_template("details", include_str!("../templates/details.txt.tera"))
        .map_err(|e| ExtractorError::Render(format!("Failed to load details template: {}", e)))?;

    tera.add_raw_template("tags", include_str!("../templates/tags.txt.tera"))
        .map_err(|e| ExtractorError::Render(format!("Failed to load tags template: {}", e)))?;

    Ok(tera)
}

/// Filter to label a parameter's `required` flag
fn requirement_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let required = value
        .as_bool()
        .ok_or_else(|| tera::Error::msg("requirement filter expects a boolean"))?;

    let label = if required { "(required)" } else { "(optional)" };
    Ok(Value::String(label.to_string()))
}
