//! News data structures for the hub's editorial feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Category;

/// Number of leading title characters used as the de-duplication key
pub const TITLE_SLUG_LEN: usize = 30;

/// A syndicated feed the hub pulls news from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    /// Feed URL (RSS or Atom)
    pub url: String,
    /// Display name of the publication
    pub name: String,
    /// Category used when keyword classification finds nothing
    pub default_category: Category,
}

impl FeedSource {
    pub fn new(name: &str, url: &str, default_category: Category) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            default_category,
        }
    }
}

/// A normalized news item, ready for display.
///
/// Built once per aggregation run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Unique identifier (source slug + hash of source/timestamp/title)
    pub id: String,
    /// Headline, entity-decoded
    pub title: String,
    /// Genre tag, or `News` for breaking items
    pub category: Category,
    /// Title matched a mortality/crisis phrase
    pub is_breaking: bool,
    /// Display date, e.g. "OCT 16, 2026"
    pub date: String,
    /// Publication time in epoch milliseconds
    pub timestamp: i64,
    /// Absolute URL of the selected illustrative image
    pub image: String,
    /// Sanitized plain-text summary
    pub description: String,
    /// Publication name
    pub source_name: String,
    /// Link to the original article
    pub source_url: String,
}

impl NewsItem {
    /// Normalized title prefix used to detect the same story twice
    pub fn title_slug(&self) -> String {
        title_slug(&self.title)
    }
}

/// First [`TITLE_SLUG_LEN`] lower-cased characters of a title
pub fn title_slug(title: &str) -> String {
    title.to_lowercase().chars().take(TITLE_SLUG_LEN).collect()
}

/// Format an epoch-millisecond timestamp for display ("OCT 16, 2026")
pub fn display_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_else(Utc::now)
        .format("%b %-d, %Y")
        .to_string()
        .to_uppercase()
}
