//! Export of search results to CSV and plain text
//!
//! Writers only see normalized [`HubAsset`] records and know nothing about
//! the Hub itself.

use crate::hf::{HubAsset, HubAssetType};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Export file format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Errors raised while writing an export file
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Format a count with thousands separators (`1234567` -> `1,234,567`)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Column headers for an export of the given asset type
pub fn headers(asset_type: HubAssetType) -> [String; 5] {
    [
        format!("{} ID", asset_type.label()),
        "Author".to_string(),
        "Downloads".to_string(),
        "Likes".to_string(),
        "Tags".to_string(),
    ]
}

/// Generated export path: `<dir>/<type>s_search_<YYYYmmdd_HHMMSS>.<ext>`
pub fn default_export_path(
    directory: &Path,
    asset_type: HubAssetType,
    format: ExportFormat,
    timestamp: DateTime<Local>,
) -> PathBuf {
    directory.join(format!(
        "{}_search_{}.{}",
        asset_type.plural(),
        timestamp.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Write results in the requested format
pub fn export(
    results: &[HubAsset],
    asset_type: HubAssetType,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => export_to_csv(results, asset_type, path),
        ExportFormat::Txt => export_to_txt(results, asset_type, path),
    }
}

/// Write results as CSV with a header row
pub fn export_to_csv(
    results: &[HubAsset],
    asset_type: HubAssetType,
    path: &Path,
) -> Result<(), ExportError> {
    let file = create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(headers(asset_type))?;
    for asset in results {
        let downloads = format_count(asset.downloads);
        let likes = format_count(asset.likes);
        let tags = asset.tags.join(", ");
        writer.write_record([
            asset.id.as_str(),
            asset.author.as_str(),
            downloads.as_str(),
            likes.as_str(),
            tags.as_str(),
        ])?;
    }
    writer.flush().map_err(|source| io_error(path, source))?;

    info!(path = %path.display(), rows = results.len(), "Exported CSV");
    Ok(())
}

/// Write results as a numbered plain-text listing
pub fn export_to_txt(
    results: &[HubAsset],
    asset_type: HubAssetType,
    path: &Path,
) -> Result<(), ExportError> {
    let mut out = BufWriter::new(create(path)?);
    write_txt(&mut out, results, asset_type)
        .and_then(|_| out.flush())
        .map_err(|source| io_error(path, source))?;

    info!(path = %path.display(), rows = results.len(), "Exported TXT");
    Ok(())
}

fn write_txt<W: Write>(
    out: &mut W,
    results: &[HubAsset],
    asset_type: HubAssetType,
) -> std::io::Result<()> {
    writeln!(out, "{} Search Results", asset_type.label())?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out)?;

    for (i, asset) in results.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, asset.id)?;
        writeln!(out, "   Author: {}", asset.author)?;
        writeln!(out, "   Downloads: {}", format_count(asset.downloads))?;
        writeln!(out, "   Likes: {}", format_count(asset.likes))?;
        if !asset.tags.is_empty() {
            writeln!(out, "   Tags: {}", asset.tags.join(", "))?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Total: {} {}", results.len(), asset_type.label())
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample() -> Vec<HubAsset> {
        vec![
            HubAsset::new("google/bert-base")
                .with_downloads(1_234_567)
                .with_likes(999)
                .with_tags(vec!["fill-mask".into(), "en".into()]),
            HubAsset::new("squad"),
        ]
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(100_000), "100,000");
    }

    #[test]
    fn test_default_export_path() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = default_export_path(Path::new("out"), HubAssetType::Model, ExportFormat::Csv, ts);
        assert_eq!(path, PathBuf::from("out/models_search_20240309_140507.csv"));

        let path = default_export_path(Path::new("."), HubAssetType::Dataset, ExportFormat::Txt, ts);
        assert_eq!(path, PathBuf::from("./datasets_search_20240309_140507.txt"));
    }

    #[test]
    fn test_export_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models.csv");

        export_to_csv(&sample(), HubAssetType::Model, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Model ID,Author,Downloads,Likes,Tags");
        assert_eq!(lines[1], "google/bert-base,google,\"1,234,567\",999,\"fill-mask, en\"");
        assert_eq!(lines[2], "squad,N/A,0,0,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_csv_dataset_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("datasets.csv");

        export(&[], HubAssetType::Dataset, ExportFormat::Csv, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Dataset ID,Author,Downloads,Likes,Tags");
    }

    #[test]
    fn test_export_txt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models.txt");

        export(&sample(), HubAssetType::Model, ExportFormat::Txt, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Model Search Results\n"));
        assert!(content.contains(&"=".repeat(80)));
        assert!(content.contains("1. google/bert-base\n   Author: google\n"));
        assert!(content.contains("   Downloads: 1,234,567\n"));
        assert!(content.contains("   Tags: fill-mask, en\n"));
        assert!(content.contains("2. squad\n   Author: N/A\n"));
        assert!(content.trim_end().ends_with("Total: 2 Model"));
        assert_eq!(content.matches("Tags:").count(), 1);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.txt");

        let err = export_to_txt(&sample(), HubAssetType::Model, &path).unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("out.txt"));
    }
}
