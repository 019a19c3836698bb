//! HuggingFace Hub API Client
//!
//! Live, blocking queries against the Hub list endpoints:
//! - `GET /api/models` for model search
//! - `GET /api/datasets` for dataset search
//!
//! One request per call, no retries. Anything that speaks the same
//! request/response shape can stand in through [`CatalogClient`].
//!
//! ## Observability
//!
//! Requests run inside a `hf.hub.list` span carrying the asset type, the
//! HTTP status and the number of records received.

use crate::config::HubConfig;
use crate::hf::query::CatalogRequest;
use crate::hf::record::RawRecord;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

// ============================================================================
// Error Types
// ============================================================================

/// Hub API error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// Request never got a response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Hub answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Response body was not a JSON array of records
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

// ============================================================================
// Catalog Capability
// ============================================================================

/// Anything able to answer a catalog list request
pub trait CatalogClient {
    /// Perform one list request and return the raw records in service order
    fn list(&self, request: &CatalogRequest) -> Result<Vec<RawRecord>, HubError>;
}

// ============================================================================
// Hub Client
// ============================================================================

/// HuggingFace Hub API client
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl HubClient {
    /// Create a client from configuration
    pub fn new(config: &HubConfig) -> Result<Self, HubError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HubError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Base endpoint, without trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full URL of the list endpoint for a request
    pub fn list_url(&self, request: &CatalogRequest) -> String {
        format!("{}/api/{}", self.endpoint, request.asset_type().plural())
    }
}

impl CatalogClient for HubClient {
    #[instrument(name = "hf.hub.list", skip(self, request), fields(
        asset_type = %request.asset_type(),
        status = tracing::field::Empty,
        record_count = tracing::field::Empty
    ))]
    fn list(&self, request: &CatalogRequest) -> Result<Vec<RawRecord>, HubError> {
        let url = self.list_url(request);
        debug!(url = %url, params = ?request.pairs(), "Querying Hub");

        let response = self
            .http
            .get(&url)
            .query(request.pairs())
            .send()
            .map_err(|e| HubError::NetworkError(error_chain(&e)))?;

        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());

        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "Hub request failed");
            return Err(HubError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&message, status),
            });
        }

        let body: Value = response
            .json()
            .map_err(|e| HubError::InvalidResponse(error_chain(&e)))?;
        let items = body
            .as_array()
            .ok_or_else(|| HubError::InvalidResponse("expected a JSON array".to_string()))?;

        let records: Vec<RawRecord> = items.iter().map(RawRecord::from).collect();
        tracing::Span::current().record("record_count", records.len());
        Ok(records)
    }
}

/// Render an error with every underlying cause, outermost first
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Pull the Hub's `{"error": "..."}` message out of an error body when present
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

#[cfg(test)]
#[path = "hub_client_tests.rs"]
mod tests;
