//! Search filters and catalog request construction
//!
//! Filters are collected through [`SearchFilters`] and translated into the
//! exact query pairs the Hub API understands by [`CatalogRequest`]. A filter
//! that was never supplied produces no pair at all, so the Hub applies its
//! own defaults for it.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default number of results requested from the Hub.
pub const DEFAULT_LIMIT: usize = 10;

// ============================================================================
// Asset Types
// ============================================================================

/// Kind of Hub asset being searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HubAssetType {
    Model,
    Dataset,
}

impl HubAssetType {
    /// Plural lowercase form, also the API path segment (`models`, `datasets`)
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Dataset => "datasets",
        }
    }

    /// Capitalized form used in titles and export headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Dataset => "Dataset",
        }
    }
}

impl std::fmt::Display for HubAssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Dataset => write!(f, "dataset"),
        }
    }
}

// ============================================================================
// Search Filters
// ============================================================================

/// Optional search constraints for one query call.
///
/// Everything except `limit` may be absent. Empty strings and empty tag sets
/// count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    /// Free-text search
    pub query: Option<String>,
    /// Maximum results to return
    pub limit: usize,
    /// Author or organization
    pub author: Option<String>,
    /// Tags, in first-seen order without duplicates
    pub tags: Vec<String>,
    /// Task (pipeline tag), models only
    pub task: Option<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            limit: DEFAULT_LIMIT,
            author: None,
            tags: Vec::new(),
            task: None,
        }
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = non_empty(query);
        self
    }

    /// Set the result limit. The Hub needs at least one, so 0 becomes 1.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = non_empty(author);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        if let Some(tag) = non_empty(tag) {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |filters, tag| filters.with_tag(tag))
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = non_empty(task);
        self
    }

    /// Set the query only when one is given
    pub fn maybe_query(self, query: Option<impl Into<String>>) -> Self {
        match query {
            Some(q) => self.with_query(q),
            None => self,
        }
    }

    /// Set the author only when one is given
    pub fn maybe_author(self, author: Option<impl Into<String>>) -> Self {
        match author {
            Some(a) => self.with_author(a),
            None => self,
        }
    }

    /// Set the task only when one is given
    pub fn maybe_task(self, task: Option<impl Into<String>>) -> Self {
        match task {
            Some(t) => self.with_task(t),
            None => self,
        }
    }
}

// ============================================================================
// Catalog Request
// ============================================================================

/// Wire names of the Hub list endpoints' query parameters
pub mod params {
    pub const SEARCH: &str = "search";
    pub const AUTHOR: &str = "author";
    pub const FILTER: &str = "filter";
    pub const PIPELINE_TAG: &str = "pipeline_tag";
    pub const LIMIT: &str = "limit";
}

/// A fully resolved list request against one Hub endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    asset_type: HubAssetType,
    pairs: Vec<(&'static str, String)>,
    limit: usize,
}

impl CatalogRequest {
    /// Request for the models endpoint
    pub fn models(filters: &SearchFilters) -> Self {
        let mut request = Self::base(HubAssetType::Model, filters);
        if let Some(task) = &filters.task {
            request.pairs.push((params::PIPELINE_TAG, task.clone()));
        }
        request.push_limit();
        request
    }

    /// Request for the datasets endpoint. Datasets have no task concept.
    pub fn datasets(filters: &SearchFilters) -> Self {
        if let Some(task) = &filters.task {
            warn!(task = %task, "Task filter is not supported for datasets, ignoring");
        }
        let mut request = Self::base(HubAssetType::Dataset, filters);
        request.push_limit();
        request
    }

    fn base(asset_type: HubAssetType, filters: &SearchFilters) -> Self {
        let mut pairs = Vec::new();
        if let Some(query) = &filters.query {
            pairs.push((params::SEARCH, query.clone()));
        }
        if let Some(author) = &filters.author {
            pairs.push((params::AUTHOR, author.clone()));
        }
        for tag in &filters.tags {
            pairs.push((params::FILTER, tag.clone()));
        }
        Self {
            asset_type,
            pairs,
            limit: filters.limit.max(1),
        }
    }

    fn push_limit(&mut self) {
        self.pairs.push((params::LIMIT, self.limit.to_string()));
    }

    pub fn asset_type(&self) -> HubAssetType {
        self.asset_type
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Query pairs in wire order
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    /// All values sent under `key`
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_display() {
        assert_eq!(HubAssetType::Model.to_string(), "model");
        assert_eq!(HubAssetType::Dataset.to_string(), "dataset");
        assert_eq!(HubAssetType::Dataset.plural(), "datasets");
        assert_eq!(HubAssetType::Model.label(), "Model");
    }

    #[test]
    fn test_filters_default_limit() {
        let filters = SearchFilters::new();
        assert_eq!(filters.limit, 10);
        assert!(filters.query.is_none());
        assert!(filters.tags.is_empty());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let filters = SearchFilters::new()
            .with_query("")
            .with_author("")
            .with_task("")
            .with_tags(["", ""]);
        assert_eq!(filters, SearchFilters::new());
    }

    #[test]
    fn test_tags_deduplicated_in_order() {
        let filters = SearchFilters::new().with_tags(["nlp", "bert", "nlp", "en"]);
        assert_eq!(filters.tags, vec!["nlp", "bert", "en"]);
    }

    #[test]
    fn test_minimal_request_only_has_limit() {
        let request = CatalogRequest::models(&SearchFilters::new());
        assert_eq!(request.pairs(), &[(params::LIMIT, "10".to_string())]);
    }

    #[test]
    fn test_zero_limit_becomes_one() {
        assert_eq!(SearchFilters::new().with_limit(0).limit, 1);

        let filters = SearchFilters {
            limit: 0,
            ..SearchFilters::default()
        };
        let request = CatalogRequest::datasets(&filters);
        assert_eq!(request.limit(), 1);
        assert_eq!(request.values(params::LIMIT), vec!["1"]);
    }

    #[test]
    fn test_model_request_all_filters() {
        let filters = SearchFilters::new()
            .with_query("bert")
            .with_author("google")
            .with_tags(["pytorch", "en"])
            .with_task("fill-mask")
            .with_limit(5);
        let request = CatalogRequest::models(&filters);

        assert_eq!(request.asset_type(), HubAssetType::Model);
        assert_eq!(request.values(params::SEARCH), vec!["bert"]);
        assert_eq!(request.values(params::AUTHOR), vec!["google"]);
        assert_eq!(request.values(params::FILTER), vec!["pytorch", "en"]);
        assert_eq!(request.values(params::PIPELINE_TAG), vec!["fill-mask"]);
        assert_eq!(request.values(params::LIMIT), vec!["5"]);
    }

    #[test]
    fn test_dataset_request_drops_task() {
        let filters = SearchFilters::new()
            .with_query("sentiment")
            .with_task("text-classification");
        let request = CatalogRequest::datasets(&filters);

        assert_eq!(request.asset_type(), HubAssetType::Dataset);
        assert!(request.has_param(params::SEARCH));
        assert!(!request.has_param(params::PIPELINE_TAG));
    }

    #[test]
    fn test_maybe_setters_skip_none() {
        let filters = SearchFilters::new()
            .maybe_query(None::<String>)
            .maybe_author(Some("google"))
            .maybe_task(None::<&str>);
        assert!(filters.query.is_none());
        assert_eq!(filters.author.as_deref(), Some("google"));
        assert!(filters.task.is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn opt_text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z0-9-]{1,12}")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_omitted_filters_are_not_sent(
            query in opt_text(),
            author in opt_text(),
            task in opt_text(),
            tags in proptest::collection::vec("[a-z]{1,8}", 0..4),
            limit in 1usize..200,
        ) {
            let filters = SearchFilters::new()
                .maybe_query(query.clone())
                .maybe_author(author.clone())
                .maybe_task(task.clone())
                .with_tags(tags.clone())
                .with_limit(limit);
            let request = CatalogRequest::models(&filters);

            prop_assert_eq!(request.has_param(params::SEARCH), query.is_some());
            prop_assert_eq!(request.has_param(params::AUTHOR), author.is_some());
            prop_assert_eq!(request.has_param(params::PIPELINE_TAG), task.is_some());
            prop_assert_eq!(request.has_param(params::FILTER), !tags.is_empty());
            let limit_str = limit.to_string();
            prop_assert_eq!(request.values(params::LIMIT), vec![limit_str.as_str()]);
        }

        #[test]
        fn prop_dataset_requests_never_carry_task(
            task in opt_text(),
            query in opt_text(),
        ) {
            let filters = SearchFilters::new().maybe_task(task).maybe_query(query);
            let request = CatalogRequest::datasets(&filters);
            prop_assert!(!request.has_param(params::PIPELINE_TAG));
            prop_assert!(request.has_param(params::LIMIT));
        }
    }
}
