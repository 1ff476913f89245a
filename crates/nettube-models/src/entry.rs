//! Catalog entry models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::source::SourceType;

/// A normalized, playable catalog entry (one tile in a category row).
///
/// Entries are produced once per fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Platform-native ID when resolvable, else `ext-{index}-{category}`
    pub id: String,

    /// Cleaned human-readable title
    pub title: String,

    pub description: String,

    /// Poster image URL
    pub thumbnail: String,

    /// Resolved, directly embeddable URL (never the raw page URL for platforms)
    pub video_url: String,

    pub source_type: SourceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Maturity rating (e.g. PG-13)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,

    /// Runtime (e.g. 2h 15m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Category label this entry was fetched for
    pub category: String,
}

/// An ordered row of entries for one category.
///
/// Order is presentation order as returned by the model or the fallback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryResult {
    pub category: String,
    pub entries: Vec<CatalogEntry>,
}

impl CategoryResult {
    pub fn new(category: impl Into<String>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            category: category.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A web-search citation returned alongside a model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroundingCitation {
    pub uri: String,
    pub title: String,
}

impl GroundingCitation {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}
