//! Endpoint Extractor CLI
//!
//! Command-line interface for flattening OpenAPI specs into endpoint lists
//! and querying the extracted endpoints.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use endpoint_extractor_catalog::{
    save_endpoints, ConsoleRenderer, EndpointCatalog, RequestPlan, DEFAULT_ENDPOINTS_FILE,
    DEFAULT_SAMPLE_SIZE,
};
use endpoint_extractor_common::Endpoint;
use endpoint_extractor_parser::OpenApiParser;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "endpoint-extractor")]
#[command(version, about = "Flatten OpenAPI specs into endpoint lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract endpoints from an OpenAPI spec into a JSON file
    #[command(after_help = "EXAMPLES:\n  \
        # Extract the DigitalOcean API\n  \
        endpoint-extractor extract --spec DigitalOcean-public.v2.yaml\n\n  \
        # Write to a custom location and show ten samples\n  \
        endpoint-extractor extract \\\n    \
        --spec openapi.json \\\n    \
        --output ./out/endpoints.json \\\n    \
        --sample 10")]
    Extract {
        /// Path to the OpenAPI spec (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = DEFAULT_ENDPOINTS_FILE)]
        output: PathBuf,

        /// Number of sample endpoints to print
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample: usize,
    },

    /// List extracted endpoints
    List {
        /// Extracted endpoints file
        #[arg(short, long, default_value = DEFAULT_ENDPOINTS_FILE)]
        endpoints: PathBuf,

        /// Only endpoints with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of endpoints to show
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Search endpoints by operation id, summary, description or tag
    Search {
        /// Case-insensitive search text
        query: String,

        /// Extracted endpoints file
        #[arg(short, long, default_value = DEFAULT_ENDPOINTS_FILE)]
        endpoints: PathBuf,

        /// Maximum number of endpoints to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show details of one endpoint
    Show {
        /// Operation ID of the endpoint
        operation_id: String,

        /// Extracted endpoints file
        #[arg(short, long, default_value = DEFAULT_ENDPOINTS_FILE)]
        endpoints: PathBuf,
    },

    /// List all endpoint tags
    Tags {
        /// Extracted endpoints file
        #[arg(short, long, default_value = DEFAULT_ENDPOINTS_FILE)]
        endpoints: PathBuf,
    },

    /// Plan the HTTP request for an endpoint without sending it
    #[command(after_help = "EXAMPLES:\n  \
        endpoint-extractor request droplets_get \\\n    \
        --base-url https://api.digitalocean.com \\\n    \
        --param droplet_id=3164444")]
    Request {
        /// Operation ID of the endpoint
        operation_id: String,

        /// API base URL
        #[arg(long, env = "ENDPOINT_EXTRACTOR_BASE_URL")]
        base_url: String,

        /// Argument as name=value; values are parsed as JSON when possible
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        /// Extracted endpoints file
        #[arg(short, long, default_value = DEFAULT_ENDPOINTS_FILE)]
        endpoints: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Extract {
            spec,
            output,
            sample,
        } => {
            extract_command(spec.as_path(), output.as_path(), sample, cli.verbose)?;
        }
        Commands::List {
            endpoints,
            tag,
            limit,
        } => {
            list_command(endpoints.as_path(), tag.as_deref(), limit)?;
        }
        Commands::Search {
            query,
            endpoints,
            limit,
        } => {
            search_command(endpoints.as_path(), &query, limit)?;
        }
        Commands::Show {
            operation_id,
            endpoints,
        } => {
            show_command(endpoints.as_path(), &operation_id)?;
        }
        Commands::Tags { endpoints } => {
            tags_command(endpoints.as_path())?;
        }
        Commands::Request {
            operation_id,
            base_url,
            params,
            endpoints,
        } => {
            request_command(endpoints.as_path(), &operation_id, &base_url, params)?;
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        concat!(
            "warn,endpoint_extractor=debug,",
            "endpoint_extractor_parser=debug,",
            "endpoint_extractor_catalog=debug"
        )
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn extract_command(spec_path: &Path, output: &Path, sample: usize, verbose: bool) -> Result<()> {
    if !spec_path.exists() {
        anyhow::bail!("Spec file not found at {}", spec_path.display());
    }

    debug!(output = %output.display(), sample, "Extract options");

    println!(
        "{} Extracting endpoints from {}...",
        "→".cyan(),
        spec_path.display()
    );

    let parser = OpenApiParser::from_file(spec_path).context("Error loading spec file")?;
    let extraction = parser.extract();

    if extraction.paths_missing {
        println!("{} No paths found in spec", "⚠".yellow());
    }

    if verbose {
        let document = parser.document();
        println!("  Title: {}", document.title().unwrap_or("unknown"));
        println!("  Version: {}", document.spec_version().unwrap_or("unknown"));
        println!("  Skipped $ref parameters: {}", extraction.skipped_refs);
    }

    if extraction.skipped_operations > 0 {
        println!(
            "{} Skipped {} malformed operation(s)",
            "⚠".yellow(),
            extraction.skipped_operations
        );
    }

    if extraction.skipped_paths > 0 {
        println!(
            "{} Skipped {} malformed path(s)",
            "⚠".yellow(),
            extraction.skipped_paths
        );
    }

    println!(
        "{} Found {} endpoints",
        "✓".green(),
        extraction.endpoints.len()
    );

    save_endpoints(output, &extraction.endpoints).context("Failed to save endpoints")?;
    println!("{} Endpoints saved to {}", "✓".green(), output.display());

    if sample > 0 {
        let renderer = ConsoleRenderer::new().context("Failed to load templates")?;
        let text = renderer
            .sample(&extraction.endpoints, sample)
            .context("Failed to render sample endpoints")?;
        println!("\n{}", text);
    }

    Ok(())
}

fn list_command(endpoints_path: &Path, tag: Option<&str>, limit: usize) -> Result<()> {
    let catalog = load_catalog(endpoints_path)?;

    let matches: Vec<&Endpoint> = match tag {
        Some(tag) => catalog.by_tag(tag),
        None => catalog.all().iter().collect(),
    };

    let heading = match tag {
        Some(tag) => format!("Found {} endpoints tagged \"{}\"", matches.len(), tag),
        None => format!("Found {} endpoints", matches.len()),
    };
    print_endpoints(&heading, &matches, limit)
}

fn search_command(endpoints_path: &Path, query: &str, limit: usize) -> Result<()> {
    let catalog = load_catalog(endpoints_path)?;
    let matches = catalog.search(query);

    let heading = format!("Found {} endpoints matching \"{}\"", matches.len(), query);
    print_endpoints(&heading, &matches, limit)
}

fn show_command(endpoints_path: &Path, operation_id: &str) -> Result<()> {
    let catalog = load_catalog(endpoints_path)?;
    let endpoint = catalog.require(operation_id)?;

    let renderer = ConsoleRenderer::new().context("Failed to load templates")?;
    let text = renderer
        .details(endpoint)
        .context("Failed to render endpoint details")?;
    println!("{}", text);

    Ok(())
}

fn tags_command(endpoints_path: &Path) -> Result<()> {
    let catalog = load_catalog(endpoints_path)?;
    let tags = catalog.tags();

    println!("{}\n", "Available tags:".bold());
    let renderer = ConsoleRenderer::new().context("Failed to load templates")?;
    println!("{}", renderer.tags(&tags).context("Failed to render tags")?);

    Ok(())
}

fn request_command(
    endpoints_path: &Path,
    operation_id: &str,
    base_url: &str,
    params: Vec<(String, Value)>,
) -> Result<()> {
    let catalog = load_catalog(endpoints_path)?;
    let endpoint = catalog.require(operation_id)?;

    let params: Map<String, Value> = params.into_iter().collect();
    let plan = RequestPlan::build(endpoint, base_url, &params)
        .with_context(|| format!("Failed to plan request for {}", operation_id))?;

    for name in &plan.missing_path_params {
        println!("{} No value for path parameter {}", "⚠".yellow(), name.yellow());
    }

    println!("{} {} {}", "→".cyan(), plan.method.to_string().bold(), plan.full_url());
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

fn load_catalog(path: &Path) -> Result<EndpointCatalog> {
    EndpointCatalog::from_file(path).with_context(|| {
        format!(
            "Failed to load endpoints from {} (run `endpoint-extractor extract` first)",
            path.display()
        )
    })
}

fn print_endpoints(heading: &str, endpoints: &[&Endpoint], limit: usize) -> Result<()> {
    let shown = &endpoints[..endpoints.len().min(limit)];

    if shown.len() < endpoints.len() {
        println!("{} (showing first {})\n", heading.bold(), shown.len());
    } else {
        println!("{}\n", heading.bold());
    }

    let renderer = ConsoleRenderer::new().context("Failed to load templates")?;
    println!(
        "{}",
        renderer
            .listing(shown)
            .context("Failed to render endpoints")?
    );

    Ok(())
}

/// Parse a `name=value` argument
fn parse_param(s: &str) -> std::result::Result<(String, Value), String> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{}`", s))?;

    if name.is_empty() {
        return Err(format!("missing parameter name in `{}`", s));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
