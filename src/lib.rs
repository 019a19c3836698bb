//! hfsearch - search models and datasets on the HuggingFace Hub
//!
//! ```no_run
//! use hfsearch::config::HubConfig;
//! use hfsearch::hf::{search_models, HubClient, SearchFilters};
//!
//! let client = HubClient::new(&HubConfig::default())?;
//! let results = search_models(&client, &SearchFilters::new().with_query("bert").with_limit(5))?;
//! for model in &results {
//!     println!("{} by {}", model.id, model.author);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod export;
pub mod hf;

// Re-export key types for convenience
pub use config::HfSearchConfig;
pub use export::{export_to_csv, export_to_txt, ExportError, ExportFormat};
pub use hf::{
    search_datasets, search_models, CatalogClient, HubAsset, HubAssetType, HubClient, HubError,
    SearchError, SearchFilters,
};
