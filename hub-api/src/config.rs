//! Server configuration from the environment

use std::env;
use std::time::Duration;

use hub_core::FeedSource;
use hub_news::{get_curated_feeds, get_feature_sources};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_NEWS_TTL_SECS: u64 = 15 * 60;

#[derive(Debug, Clone)]
pub struct HubConfig {
    pub port: u16,
    /// SQLite cache location; `None` keeps the cache in memory
    pub cache_db_path: Option<String>,
    pub news_ttl: Duration,
    pub sources: Vec<FeedSource>,
    pub feature_sources: Vec<String>,
}

impl HubConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - SERVER_PORT (default 3001)
    /// - CACHE_DB_PATH (unset: in-memory cache)
    /// - NEWS_TTL_SECS (default 900)
    /// - HUB_FEED_SOURCES: JSON array of feed sources, replaces the curated list
    /// - HUB_FEATURE_SOURCES: comma-separated source names for the artist card
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                field: "SERVER_PORT".to_string(),
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let news_ttl_secs = match lookup("NEWS_TTL_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                field: "NEWS_TTL_SECS".to_string(),
                value: raw,
            })?,
            None => DEFAULT_NEWS_TTL_SECS,
        };

        let sources = match lookup("HUB_FEED_SOURCES") {
            Some(json) => {
                let sources: Vec<FeedSource> =
                    serde_json::from_str(&json).map_err(|e| ConfigError::InvalidJson {
                        field: "HUB_FEED_SOURCES".to_string(),
                        error: e.to_string(),
                    })?;
                if sources.is_empty() {
                    return Err(ConfigError::EmptySourceList);
                }
                sources
            }
            None => get_curated_feeds(),
        };

        let feature_sources = lookup("HUB_FEATURE_SOURCES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(get_feature_sources);

        Ok(Self {
            port,
            cache_db_path: lookup("CACHE_DB_PATH").filter(|p| !p.trim().is_empty()),
            news_ttl: Duration::from_secs(news_ttl_secs),
            sources,
            feature_sources,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid JSON in {field}: {error}")]
    InvalidJson { field: String, error: String },

    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("HUB_FEED_SOURCES cannot be empty")]
    EmptySourceList,
}
