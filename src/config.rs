use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = "hfsearch.toml";

/// Environment variable overriding the Hub endpoint
pub const ENDPOINT_ENV: &str = "HF_ENDPOINT";

/// hfsearch configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HfSearchConfig {
    /// Hub connection settings
    pub hub: HubConfig,

    /// Search defaults
    pub search: SearchConfig,

    /// Export settings
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Hub base URL (the API lives under `/api`)
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://huggingface.co".to_string(),
            timeout_secs: 30,
            user_agent: format!("hfsearch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results per search when `--limit` is not given
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: crate::hf::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when `--export-format` is not given
    pub format: ExportFormat,

    /// Directory for generated export files
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            directory: PathBuf::from("."),
        }
    }
}

impl HfSearchConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no search could honor
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.limit == 0 {
            anyhow::bail!("search.limit must be at least 1");
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `hfsearch.toml` from the current directory, if present
    pub fn load_optional() -> anyhow::Result<Option<Self>> {
        let path = Path::new(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
    }

    fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.hub.endpoint = endpoint;
        }
    }
}
