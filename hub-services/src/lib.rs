//! Service layer for the music hub
//!
//! This crate aggregates the feed pipeline from `hub-news` into the single
//! ordered news list, caches it, and derives the side views shown next to it.

pub mod aggregator;
pub mod cache;
pub mod news_service;
pub mod sqlite_store;
pub mod views;

pub use aggregator::{
    Aggregation, Aggregator, AggregatorConfig, SourceFailure, SourceOutcome, SourceReport,
};
pub use cache::{CacheEntry, CacheError, CacheStore, Cacheable, Freshness, MemoryStore, NewsCache};
pub use news_service::{NewsService, NewsServiceConfig, ARTIST_CACHE_KEY, NEWS_CACHE_KEY};
pub use sqlite_store::SqliteStore;
