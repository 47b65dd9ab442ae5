//! News Service
//!
//! The output contract the API depends on: the cached aggregated news list
//! and the views derived from it. Every method degrades to empty or fallback
//! content instead of returning an error.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{info, instrument};

use hub_core::{ArtistBio, FeedSource, NewsItem, Quote};
use hub_news::{get_curated_feeds, get_feature_sources, FeedFetcher};

use crate::aggregator::{Aggregator, AggregatorConfig, SourceReport};
use crate::cache::{CacheStore, Freshness, NewsCache};
use crate::views;

/// Cache key for the aggregated news list
pub const NEWS_CACHE_KEY: &str = "hub_live_editorial_v5";
/// Cache key for the artist-of-the-day card
pub const ARTIST_CACHE_KEY: &str = "hub_artist_day_v5";

/// Configuration for NewsService
#[derive(Debug, Clone)]
pub struct NewsServiceConfig {
    /// How long an aggregated list is served from cache
    pub news_ttl: Duration,
    /// Sources to aggregate, in priority order
    pub sources: Vec<FeedSource>,
    /// Source names preferred for the artist card
    pub feature_sources: Vec<String>,
    pub aggregator: AggregatorConfig,
}

impl Default for NewsServiceConfig {
    fn default() -> Self {
        Self {
            news_ttl: Duration::from_secs(15 * 60),
            sources: get_curated_feeds(),
            feature_sources: get_feature_sources(),
            aggregator: AggregatorConfig::default(),
        }
    }
}

pub struct NewsService {
    aggregator: Aggregator,
    cache: NewsCache,
    sources: Vec<FeedSource>,
    feature_sources: Vec<String>,
    news_ttl: Duration,
    /// Per-source outcomes of the most recent aggregation run
    last_reports: RwLock<Vec<SourceReport>>,
}

impl NewsService {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        store: Arc<dyn CacheStore>,
        config: NewsServiceConfig,
    ) -> Self {
        info!(
            "Initializing NewsService ({} sources, news TTL {}s)",
            config.sources.len(),
            config.news_ttl.as_secs()
        );
        Self {
            aggregator: Aggregator::new(fetcher, config.aggregator),
            cache: NewsCache::new(store),
            sources: config.sources,
            feature_sources: config.feature_sources,
            news_ttl: config.news_ttl,
            last_reports: RwLock::new(Vec::new()),
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Outcomes of the last aggregation run this process performed
    pub fn last_reports(&self) -> Vec<SourceReport> {
        self.last_reports.read().clone()
    }

    /// The aggregated list, from cache when fresh
    #[instrument(skip(self))]
    pub async fn latest_news(&self) -> Vec<NewsItem> {
        self.cache
            .get_or_refresh(NEWS_CACHE_KEY, Freshness::Ttl(self.news_ttl), move || {
                self.aggregate_now()
            })
            .await
    }

    /// Run a full aggregation, bypassing the cache
    pub async fn aggregate_now(&self) -> Vec<NewsItem> {
        let aggregation = self.aggregator.aggregate(&self.sources).await;
        *self.last_reports.write() = aggregation.reports;
        aggregation.items
    }

    /// Artist card, recomputed once per calendar day
    pub async fn artist_of_the_day(&self) -> ArtistBio {
        self.cache
            .get_or_refresh(ARTIST_CACHE_KEY, Freshness::CalendarDay, move || async move {
                let items = self.latest_news().await;
                views::artist_of_the_day(&items, &self.feature_sources)
                    .unwrap_or_else(ArtistBio::fallback)
            })
            .await
    }

    pub async fn quote_of_the_moment(&self) -> Quote {
        let items = self.latest_news().await;
        let quote = {
            let mut rng = rand::rng();
            views::quote_of_the_moment(&items, &mut rng)
        };
        quote.unwrap_or_else(Quote::fallback)
    }

    pub async fn search(&self, query: &str) -> Vec<NewsItem> {
        let items = self.latest_news().await;
        views::search(&items, query).into_iter().cloned().collect()
    }

    /// Look up one item of the current list for the detail view
    pub async fn news_item(&self, id: &str) -> Option<NewsItem> {
        let items = self.latest_news().await;
        views::find_by_id(&items, id).cloned()
    }
}
