//! Raw catalog records and their normalized form
//!
//! The Hub returns loosely shaped JSON objects. [`RawRecord`] keeps every
//! field optional, and [`normalize`] turns it into a [`HubAsset`] where every
//! field is present. A malformed record is never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used when neither the id nor the record names an author
pub const UNKNOWN: &str = "N/A";

/// One item as returned by the Hub, with every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub author: Option<String>,
    pub downloads: Option<u64>,
    pub likes: Option<u64>,
    pub tags: Option<Vec<String>>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_downloads(mut self, downloads: u64) -> Self {
        self.downloads = Some(downloads);
        self
    }

    pub fn with_likes(mut self, likes: u64) -> Self {
        self.likes = Some(likes);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

impl From<&Value> for RawRecord {
    fn from(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let count = |key: &str| value.get(key).and_then(Value::as_u64);
        let tags = value.get("tags").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        Self {
            id: text("id"),
            author: text("author"),
            downloads: count("downloads"),
            likes: count("likes"),
            tags,
        }
    }
}

/// Normalized Hub asset. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubAsset {
    /// Asset ID (e.g., "google/bert-base-uncased")
    pub id: String,
    /// Author/organization
    pub author: String,
    /// Downloads count
    pub downloads: u64,
    /// Likes count
    pub likes: u64,
    /// Tags, in Hub order
    pub tags: Vec<String>,
}

impl HubAsset {
    /// Asset with the author taken from the id and zeroed counters
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let author = resolve_author(&id, None);
        Self {
            id,
            author,
            downloads: 0,
            likes: 0,
            tags: Vec::new(),
        }
    }

    pub fn with_downloads(mut self, downloads: u64) -> Self {
        self.downloads = downloads;
        self
    }

    pub fn with_likes(mut self, likes: u64) -> Self {
        self.likes = likes;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Resolve the author of an asset.
///
/// The namespace before the first `/` of the id always wins. The record's
/// own author is only consulted for un-namespaced ids.
pub fn resolve_author(id: &str, raw_author: Option<&str>) -> String {
    match id.split_once('/') {
        Some((owner, _)) => owner.to_string(),
        None => raw_author.unwrap_or(UNKNOWN).to_string(),
    }
}

/// Normalize a raw record, defaulting every missing field
pub fn normalize(raw: &RawRecord) -> HubAsset {
    let id = raw.id.clone().unwrap_or_else(|| UNKNOWN.to_string());
    let author = resolve_author(&id, raw.author.as_deref());
    HubAsset {
        id,
        author,
        downloads: raw.downloads.unwrap_or(0),
        likes: raw.likes.unwrap_or(0),
        tags: raw.tags.clone().unwrap_or_default(),
    }
}

impl From<RawRecord> for HubAsset {
    fn from(raw: RawRecord) -> Self {
        normalize(&raw)
    }
}
