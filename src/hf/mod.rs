//! HuggingFace Hub search
//!
//! Turns optional filters into Hub list requests and normalizes whatever the
//! Hub returns into [`HubAsset`] records.
//!
//! - [`query`] - filters and request construction
//! - [`hub_client`] - the catalog capability and its HTTP implementation
//! - [`record`] - raw records and normalization
//! - [`search`] - model and dataset search

pub mod hub_client;
pub mod query;
pub mod record;
pub mod search;

pub use hub_client::{CatalogClient, HubClient, HubError};
pub use query::{CatalogRequest, HubAssetType, SearchFilters, DEFAULT_LIMIT};
pub use record::{normalize, resolve_author, HubAsset, RawRecord};
pub use search::{search_datasets, search_models, SearchError};
