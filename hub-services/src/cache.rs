//! News Cache
//!
//! Keyed JSON cache in front of expensive producers (the aggregation run and
//! the artist-of-the-day derivation). Entries carry the time they were
//! written; freshness is judged on read by a TTL or by calendar day.
//!
//! The cache never fails a caller: unreadable or corrupt entries are misses
//! and write failures only cost the next caller a refresh.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, TimeZone, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hub_core::ArtistBio;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw key/value persistence behind [`NewsCache`]
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What is persisted under each key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    /// Epoch milliseconds at write time
    pub timestamp: i64,
}

/// How long an entry stays usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Fresh while younger than the duration
    Ttl(Duration),
    /// Fresh while written on the current local calendar day
    CalendarDay,
}

impl Freshness {
    pub fn is_fresh(&self, written_at_ms: i64, now_ms: i64) -> bool {
        match self {
            Freshness::Ttl(ttl) => {
                let age = now_ms.saturating_sub(written_at_ms);
                age >= 0 && (age as u128) < ttl.as_millis()
            }
            Freshness::CalendarDay => {
                match (
                    Local.timestamp_millis_opt(written_at_ms).single(),
                    Local.timestamp_millis_opt(now_ms).single(),
                ) {
                    (Some(written), Some(now)) => written.date_naive() == now.date_naive(),
                    _ => false,
                }
            }
        }
    }
}

/// Data worth persisting. Empty or placeholder results are returned to the
/// caller but never written, so the next call retries.
pub trait Cacheable {
    fn is_cacheable(&self) -> bool;
}

impl<T> Cacheable for Vec<T> {
    fn is_cacheable(&self) -> bool {
        !self.is_empty()
    }
}

impl Cacheable for ArtistBio {
    fn is_cacheable(&self) -> bool {
        *self != ArtistBio::fallback()
    }
}

/// Typed cache over a [`CacheStore`]
#[derive(Clone)]
pub struct NewsCache {
    store: Arc<dyn CacheStore>,
}

impl NewsCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Return the cached value under `key` if still fresh, otherwise run
    /// `producer`, persist its result when cacheable and return it.
    ///
    /// Concurrent callers that both miss will both produce; the last write
    /// wins.
    pub async fn get_or_refresh<T, F, Fut>(&self, key: &str, freshness: Freshness, producer: F) -> T
    where
        T: Serialize + DeserializeOwned + Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let now = Utc::now().timestamp_millis();

        if let Some(entry) = self.read::<T>(key).await {
            if freshness.is_fresh(entry.timestamp, now) {
                debug!("Cache hit for {}", key);
                return entry.data;
            }
            debug!("Cache entry for {} is stale", key);
        }

        let data = producer().await;

        if data.is_cacheable() {
            let entry = CacheEntry {
                data,
                timestamp: Utc::now().timestamp_millis(),
            };
            if let Err(e) = self.write(key, &entry).await {
                warn!("Failed to write cache entry {}: {}", key, e);
            }
            entry.data
        } else {
            debug!("Not caching empty result for {}", key);
            data
        }
    }

    /// Read an entry regardless of freshness. Corrupt entries read as `None`.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Discarding corrupt cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, entry: &CacheEntry<T>) -> Result<(), CacheError> {
        let raw = serde_json::to_string(entry)?;
        self.store.set(key, &raw).await
    }
}
