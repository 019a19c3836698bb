//! CLI command logic - extracted for testability
//!
//! Argument definitions and configuration resolution live here; the search
//! command and its rendering live in [`hf`].

pub mod hf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hfsearch::config::HfSearchConfig;
use hfsearch::export::ExportFormat;
use hfsearch::hf::{HubAssetType, HubClient};
use std::path::{Path, PathBuf};
use tracing::debug;

const EXAMPLES: &str = "\
Examples:
  hfsearch models --query \"bert\"
  hfsearch models --query \"translation\" --limit 20
  hfsearch models --author \"google\" --limit 5
  hfsearch datasets --query \"sentiment\"
  hfsearch datasets --tags \"text-classification\" --limit 15
  hfsearch models --query \"bert\" --export
  hfsearch models --query \"bert\" --export --export-format txt";

#[derive(Parser)]
#[command(name = "hfsearch")]
#[command(version, about = "Search for models and datasets on Hugging Face Hub", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file (defaults to ./hfsearch.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Hub endpoint (overrides the config file and HF_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for models
    Models {
        #[command(flatten)]
        search: SearchArgs,

        /// Filter by task (e.g., text-classification, translation, etc.)
        #[arg(long)]
        task: Option<String>,
    },

    /// Search for datasets
    Datasets {
        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Flags shared by both search commands
#[derive(clap::Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search query/keywords
    #[arg(long, short)]
    pub query: Option<String>,

    /// Maximum number of results to return (default: 10)
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Filter by author/organization
    #[arg(long, short)]
    pub author: Option<String>,

    /// Filter by tags (space-separated)
    #[arg(long, num_args = 1..)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Export results to a file (auto-generates filename)
    #[arg(long, short)]
    pub export: bool,

    /// Export format (default: csv)
    #[arg(long, value_enum)]
    pub export_format: Option<ExportFormat>,

    /// Export to this path instead of a generated filename (implies --export)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Formatted table
    Table,
    /// Normalized records as JSON
    Json,
}

/// Resolve configuration: file, then `HF_ENDPOINT`, then `--endpoint`
pub fn resolve_config(path: Option<&Path>, endpoint: Option<String>) -> anyhow::Result<HfSearchConfig> {
    let mut config = match path {
        Some(path) => HfSearchConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => HfSearchConfig::load_optional()?.unwrap_or_default(),
    };
    config.apply_env();
    if let Some(endpoint) = endpoint {
        config.hub.endpoint = endpoint;
    }
    debug!(endpoint = %config.hub.endpoint, "Resolved configuration");
    Ok(config)
}

/// Main command dispatcher
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.endpoint)?;
    let client = HubClient::new(&config.hub)?;

    match cli.command {
        Commands::Models { search, task } => {
            hf::cmd_search(&client, &config, HubAssetType::Model, search, task)
        }
        Commands::Datasets { search } => {
            hf::cmd_search(&client, &config, HubAssetType::Dataset, search, None)
        }
    }
}
