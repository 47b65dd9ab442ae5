//! News Aggregation Engine
//!
//! Fans out to every configured source concurrently, normalizes each
//! source's entries, then merges the results into one ordered list:
//! breaking items first (newest first), then regular items interleaved
//! round-robin across sources so no single high-volume feed dominates.
//!
//! Ordering depends only on the configured source order and the items'
//! timestamps, never on which fetch finished first.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use hub_core::{FeedSource, NewsItem};
use hub_news::feed::parse_feed;
use hub_news::normalize::normalize_entry_with_min;
use hub_news::sanitize::MIN_DESCRIPTION_LEN;
use hub_news::{FeedFetcher, NewsError};

/// Configuration for [`Aggregator`]
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Most regular items taken by the round-robin interleave
    pub regular_cap: usize,
    /// Length cap of the final list
    pub max_items: usize,
    /// Wall-clock budget for one source (fetch + parse + normalize)
    pub source_budget: Duration,
    /// Minimum sanitized description length
    pub min_description_len: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            regular_cap: 60,
            max_items: 48,
            source_budget: Duration::from_secs(20),
            min_description_len: MIN_DESCRIPTION_LEN,
        }
    }
}

/// Why a source contributed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFailure {
    /// Every relay failed or the document could not be retrieved
    Fetch(String),
    /// The source exceeded its budget
    TimedOut,
}

/// What one source produced during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Number of items that passed every gate
    Loaded(usize),
    /// Document retrieved but nothing publishable in it
    Empty,
    Failed(SourceFailure),
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOutcome::Loaded(n) => write!(f, "loaded {} items", n),
            SourceOutcome::Empty => write!(f, "empty"),
            SourceOutcome::Failed(SourceFailure::Fetch(reason)) => write!(f, "failed: {}", reason),
            SourceOutcome::Failed(SourceFailure::TimedOut) => write!(f, "timed out"),
        }
    }
}

/// Per-source result of a run
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: String,
    pub outcome: SourceOutcome,
}

/// Result of one aggregation run
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Final ordered list
    pub items: Vec<NewsItem>,
    /// One report per configured source, in configured order
    pub reports: Vec<SourceReport>,
}

/// Orchestrates fetch, parse and normalize across all sources
pub struct Aggregator {
    fetcher: Arc<dyn FeedFetcher>,
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, config: AggregatorConfig) -> Self {
        Self { fetcher, config }
    }

    /// Aggregate every source into the final ordered list.
    ///
    /// One source failing never affects the others; if all fail the list
    /// is simply empty.
    pub async fn aggregate(&self, sources: &[FeedSource]) -> Aggregation {
        let now = Utc::now();

        // Buffer everything before ordering; completion order is irrelevant
        let results = join_all(sources.iter().map(|source| self.run_source(source, now))).await;

        let mut breaking = Vec::new();
        let mut per_source = Vec::with_capacity(sources.len());
        let mut reports = Vec::with_capacity(sources.len());

        for (source, (items, outcome)) in sources.iter().zip(results) {
            match &outcome {
                SourceOutcome::Failed(_) => warn!("Source {} {}", source.name, outcome),
                _ => debug!("Source {} {}", source.name, outcome),
            }

            let (source_breaking, regular): (Vec<_>, Vec<_>) =
                items.into_iter().partition(|item| item.is_breaking);
            breaking.extend(source_breaking);
            per_source.push(regular);

            reports.push(SourceReport {
                source: source.name.clone(),
                outcome,
            });
        }

        let items = merge(breaking, per_source, &self.config);

        let healthy = reports
            .iter()
            .filter(|r| matches!(r.outcome, SourceOutcome::Loaded(_)))
            .count();
        info!(
            "Aggregated {} news items ({} breaking) from {}/{} sources",
            items.len(),
            items.iter().filter(|i| i.is_breaking).count(),
            healthy,
            sources.len()
        );

        Aggregation { items, reports }
    }

    async fn run_source(
        &self,
        source: &FeedSource,
        now: DateTime<Utc>,
    ) -> (Vec<NewsItem>, SourceOutcome) {
        match tokio::time::timeout(self.config.source_budget, self.load_source(source, now)).await
        {
            Ok(Ok(items)) if items.is_empty() => (items, SourceOutcome::Empty),
            Ok(Ok(items)) => {
                let count = items.len();
                (items, SourceOutcome::Loaded(count))
            }
            Ok(Err(e)) => (
                Vec::new(),
                SourceOutcome::Failed(SourceFailure::Fetch(e.to_string())),
            ),
            Err(_) => (Vec::new(), SourceOutcome::Failed(SourceFailure::TimedOut)),
        }
    }

    async fn load_source(
        &self,
        source: &FeedSource,
        now: DateTime<Utc>,
    ) -> Result<Vec<NewsItem>, NewsError> {
        let document = self.fetcher.fetch(&source.url).await?;
        let entries = parse_feed(&document);

        let mut items = Vec::with_capacity(entries.len());
        for entry in &entries {
            match normalize_entry_with_min(entry, source, now, self.config.min_description_len) {
                Ok(item) => items.push(item),
                Err(reason) => debug!(
                    "Dropped entry {:?} from {}: {}",
                    entry.title, source.name, reason
                ),
            }
        }

        debug!(
            "{}: {} of {} entries publishable",
            source.name,
            items.len(),
            entries.len()
        );
        Ok(items)
    }
}

/// Combine breaking items and per-source regular items into the final list.
///
/// Breaking items are sorted newest first and always come first. If they
/// alone exceed `max_items`, the oldest breaking items are dropped and no
/// regular item is shown.
pub fn merge(
    mut breaking: Vec<NewsItem>,
    per_source: Vec<Vec<NewsItem>>,
    config: &AggregatorConfig,
) -> Vec<NewsItem> {
    breaking.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    breaking.truncate(config.max_items);

    let remaining = config.max_items - breaking.len();
    let regular = interleave(per_source, config.regular_cap);

    breaking.extend(regular.into_iter().take(remaining));
    breaking
}

/// Round-robin interleave of per-source lists.
///
/// Each source's items are ordered newest first; every pass takes the next
/// item with an unseen title slug from each source in order. Items whose
/// slug was already taken are skipped for good.
pub fn interleave(per_source: Vec<Vec<NewsItem>>, cap: usize) -> Vec<NewsItem> {
    let mut queues: Vec<VecDeque<NewsItem>> = per_source
        .into_iter()
        .map(|mut items| {
            items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            items.into()
        })
        .collect();

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    loop {
        let mut progressed = false;

        for queue in queues.iter_mut() {
            if out.len() >= cap {
                return out;
            }
            while let Some(item) = queue.pop_front() {
                if seen.insert(item.title_slug()) {
                    out.push(item);
                    progressed = true;
                    break;
                }
            }
        }

        if !progressed {
            return out;
        }
    }
}
