//! Model and dataset search
//!
//! Each search issues exactly one catalog request, keeps at most `limit`
//! records in service order and normalizes them. A failed request surfaces as
//! [`SearchError`] with the underlying [`HubError`] attached.

use crate::hf::hub_client::{CatalogClient, HubError};
use crate::hf::query::{CatalogRequest, HubAssetType, SearchFilters};
use crate::hf::record::HubAsset;
use thiserror::Error;
use tracing::{info, instrument};

/// A catalog search failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error searching {}", .asset_type.plural())]
pub struct SearchError {
    asset_type: HubAssetType,
    #[source]
    source: HubError,
}

impl SearchError {
    pub fn new(asset_type: HubAssetType, source: HubError) -> Self {
        Self { asset_type, source }
    }

    /// Which search failed
    pub fn asset_type(&self) -> HubAssetType {
        self.asset_type
    }

    /// The underlying transport or service failure
    pub fn cause(&self) -> &HubError {
        &self.source
    }
}

/// Search models on the Hub
#[instrument(name = "hf.search.models", skip(client, filters), fields(
    query = filters.query.as_deref(),
    task = filters.task.as_deref(),
    limit = filters.limit,
    result_count = tracing::field::Empty
))]
pub fn search_models<C>(client: &C, filters: &SearchFilters) -> Result<Vec<HubAsset>, SearchError>
where
    C: CatalogClient + ?Sized,
{
    run(client, &CatalogRequest::models(filters))
}

/// Search datasets on the Hub. Any task filter is ignored.
#[instrument(name = "hf.search.datasets", skip(client, filters), fields(
    query = filters.query.as_deref(),
    limit = filters.limit,
    result_count = tracing::field::Empty
))]
pub fn search_datasets<C>(
    client: &C,
    filters: &SearchFilters,
) -> Result<Vec<HubAsset>, SearchError>
where
    C: CatalogClient + ?Sized,
{
    run(client, &CatalogRequest::datasets(filters))
}

fn run<C>(client: &C, request: &CatalogRequest) -> Result<Vec<HubAsset>, SearchError>
where
    C: CatalogClient + ?Sized,
{
    let asset_type = request.asset_type();
    let records = client
        .list(request)
        .map_err(|source| SearchError::new(asset_type, source))?;

    let results: Vec<HubAsset> = records
        .into_iter()
        .take(request.limit())
        .map(HubAsset::from)
        .collect();

    tracing::Span::current().record("result_count", results.len());
    info!(result_count = results.len(), "{} search completed", asset_type.label());
    Ok(results)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
