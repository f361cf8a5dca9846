//! Plain-text rendering of endpoints for the console

use crate::templates;
use endpoint_extractor_common::{Endpoint, ExtractorError, Result};
use serde::Serialize;
use tera::{Context, Tera};

/// Number of endpoints shown after an extraction
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Renders endpoints through the embedded tera templates
pub struct ConsoleRenderer {
    tera: Tera,
}

/// Parameter view with template-friendly field names
#[derive(Serialize)]
struct ParameterView<'a> {
    name: &'a str,
    location: &'a str,
    param_type: &'a str,
    required: bool,
    description: &'a str,
}

impl ConsoleRenderer {
    pub fn new() -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { tera })
    }

    /// "Sample endpoints:" followed by the first `limit` endpoints, numbered
    pub fn sample(&self, endpoints: &[Endpoint], limit: usize) -> Result<String> {
        let shown = &endpoints[..endpoints.len().min(limit)];
        let mut context = Context::new();
        context.insert("endpoints", shown);
        self.render("sample", &context)
    }

    /// One bullet line per endpoint
    pub fn listing(&self, endpoints: &[&Endpoint]) -> Result<String> {
        let mut context = Context::new();
        context.insert("endpoints", endpoints);
        self.render("listing", &context)
    }

    /// Full description of a single endpoint
    pub fn details(&self, endpoint: &Endpoint) -> Result<String> {
        let parameters: Vec<ParameterView<'_>> = endpoint
            .parameters
            .iter()
            .map(|p| ParameterView {
                name: &p.name,
                location: &p.location,
                param_type: &p.param_type,
                required: p.required,
                description: &p.description,
            })
            .collect();

        let mut context = Context::new();
        context.insert("endpoint", endpoint);
        context.insert("parameters", &parameters);
        self.render("details", &context)
    }

    /// One bullet line per tag
    pub fn tags(&self, tags: &[String]) -> Result<String> {
        let mut context = Context::new();
        context.insert("tags", tags);
        self.render("tags", &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        let rendered = self.tera.render(template, context).map_err(|e| {
            ExtractorError::Render(format!("Template error in {}: {:?}", template, e))
        })?;
        Ok(rendered.trim_end().to_string())
    }
}
