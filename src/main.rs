//! quote-calc - CLI tool to price jewelry quotes.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quote_calc_rs::{
    generate_json, generate_summary, open_quote, parse_client_file, PricingDefaults, QuoteStatus,
};

/// Output format for the priced quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Fixed-width summary table
    Text,
    /// Sections and totals as JSON
    Json,
}

/// Price a jewelry quote from its JSON document.
#[derive(Parser, Debug)]
#[command(name = "quote-calc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input quote JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Client record or pricing template JSON file
    #[arg(short, long)]
    client: Option<PathBuf>,

    /// Pricing defaults override JSON file
    #[arg(short, long)]
    defaults: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Validate only, don't print the quote
    #[arg(long)]
    validate: bool,

    /// Status to validate for (draft, completed, pending_approval, approved, rejected)
    #[arg(long, default_value = "draft", value_parser = parse_status)]
    status: QuoteStatus,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_status(s: &str) -> std::result::Result<QuoteStatus, String> {
    QuoteStatus::from_name(s).ok_or_else(|| format!("unknown status '{}'", s))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let defaults = match &args.defaults {
        Some(path) => PricingDefaults::from_json_file(path)
            .with_context(|| format!("Failed to load defaults {}", path.display()))?,
        None => PricingDefaults::default(),
    };

    let client = match &args.client {
        Some(path) => Some(
            parse_client_file(path)
                .with_context(|| format!("Failed to load client {}", path.display()))?,
        ),
        None => None,
    };

    info!("Processing: {}", args.input.display());

    let builder = open_quote(&args.input, client.as_ref(), defaults)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    if builder.is_loaded() && client.is_some() {
        info!("Saved quote keeps its own pricing; client template not applied");
    }

    // Validate
    let validation = builder.validate(args.status);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed for status {}", args.status);
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    // Generate output
    let calculation = builder.calculation();
    let output = match args.format {
        Format::Text => generate_summary(
            &builder.to_document(),
            &calculation,
            &builder.variation_breakdowns(),
        )?,
        Format::Json => format!("{}\n", generate_json(&calculation)?),
    };

    // Write output
    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}
