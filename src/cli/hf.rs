//! HuggingFace search command
//!
//! Runs a model or dataset search, renders the normalized results and
//! optionally exports them.

use super::{OutputFormat, SearchArgs};
use anyhow::Context;
use colored::Colorize;
use hfsearch::config::HfSearchConfig;
use hfsearch::export::{self, default_export_path, format_count};
use hfsearch::hf::{search_datasets, search_models, CatalogClient, HubAsset, HubAssetType, SearchFilters};
use std::path::PathBuf;
use tracing::info;

/// Tags shown per row before truncating with `...`
const MAX_TABLE_TAGS: usize = 3;

/// Build search filters from CLI flags and configuration defaults
pub fn build_filters(args: &SearchArgs, task: Option<String>, config: &HfSearchConfig) -> SearchFilters {
    let limit = args
        .limit
        .map(|l| l as usize)
        .unwrap_or(config.search.limit);

    SearchFilters::new()
        .maybe_query(args.query.clone())
        .maybe_author(args.author.clone())
        .with_tags(args.tags.iter().cloned())
        .maybe_task(task)
        .with_limit(limit)
}

pub fn cmd_search<C: CatalogClient + ?Sized>(
    client: &C,
    config: &HfSearchConfig,
    asset_type: HubAssetType,
    args: SearchArgs,
    task: Option<String>,
) -> anyhow::Result<()> {
    let filters = build_filters(&args, task, config);
    info!("Searching Hugging Face Hub for {}", asset_type.plural());

    let results = match asset_type {
        HubAssetType::Model => search_models(client, &filters)?,
        HubAssetType::Dataset => search_datasets(client, &filters)?,
    };

    if results.is_empty() {
        match args.format {
            OutputFormat::Table => println!("{}", no_results_message(asset_type).yellow()),
            OutputFormat::Json => println!("[]"),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => {
            println!();
            println!("{}", render_table(&results, asset_type));
            println!(
                "{}",
                format!("Found {} {}", results.len(), asset_type.plural()).dimmed()
            );
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    if args.export || args.output.is_some() {
        let path = export_results(&results, asset_type, &args, config)?;
        let message = format!("Results exported to {}", path.display());
        match args.format {
            OutputFormat::Table => println!("{}", message.green()),
            OutputFormat::Json => eprintln!("{}", message.green()),
        }
    }

    if filters.query.is_some() && args.format == OutputFormat::Table {
        println!(
            "{}",
            "Tip: Use 'huggingface-cli download <model_id>' to download a model".dimmed()
        );
    }

    Ok(())
}

fn export_results(
    results: &[HubAsset],
    asset_type: HubAssetType,
    args: &SearchArgs,
    config: &HfSearchConfig,
) -> anyhow::Result<PathBuf> {
    let format = args.export_format.unwrap_or(config.export.format);
    let path = args.output.clone().unwrap_or_else(|| {
        default_export_path(
            &config.export.directory,
            asset_type,
            format,
            chrono::Local::now(),
        )
    });

    export::export(results, asset_type, format, &path).context("Error exporting")?;
    Ok(path)
}

pub fn no_results_message(asset_type: HubAssetType) -> String {
    format!("No {} found matching your criteria.", asset_type.plural())
}

/// First three tags, with `...` appended when more exist
pub fn display_tags(tags: &[String]) -> String {
    let mut shown = tags
        .iter()
        .take(MAX_TABLE_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() > MAX_TABLE_TAGS {
        shown.push_str("...");
    }
    shown
}

struct Row {
    id: String,
    author: String,
    downloads: String,
    likes: String,
    tags: String,
}

fn width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.fold(header.chars().count(), usize::max)
}

/// Render results as an aligned table
pub fn render_table(results: &[HubAsset], asset_type: HubAssetType) -> String {
    let rows: Vec<Row> = results
        .iter()
        .map(|a| Row {
            id: a.id.clone(),
            author: a.author.clone(),
            downloads: format_count(a.downloads),
            likes: format_count(a.likes),
            tags: display_tags(&a.tags),
        })
        .collect();

    let [id_h, author_h, downloads_h, likes_h, tags_h] = export::headers(asset_type);
    let id_w = width(&id_h, rows.iter().map(|r| r.id.chars().count()));
    let author_w = width(&author_h, rows.iter().map(|r| r.author.chars().count()));
    let downloads_w = width(&downloads_h, rows.iter().map(|r| r.downloads.len()));
    let likes_w = width(&likes_h, rows.iter().map(|r| r.likes.len()));
    let tags_w = width(&tags_h, rows.iter().map(|r| r.tags.chars().count()));
    let total = id_w + author_w + downloads_w + likes_w + tags_w + 8;

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(
        format!("{} Search Results", asset_type.label())
            .bright_magenta()
            .bold()
            .to_string(),
    );
    out.push(
        format!(
            "{:<id_w$}  {:<author_w$}  {:>downloads_w$}  {:>likes_w$}  {:<tags_w$}",
            id_h, author_h, downloads_h, likes_h, tags_h
        )
        .cyan()
        .bold()
        .to_string(),
    );
    out.push("─".repeat(total).dimmed().to_string());

    for row in &rows {
        out.push(format!(
            "{}  {}  {}  {}  {}",
            format!("{:<id_w$}", row.id).cyan(),
            format!("{:<author_w$}", row.author).yellow(),
            format!("{:>downloads_w$}", row.downloads).green(),
            format!("{:>likes_w$}", row.likes).red(),
            row.tags.blue(),
        ));
    }

    out.join("\n")
}
