//! Feed ingestion for the music hub
//!
//! This crate turns syndicated music-press feeds into publishable items:
//! - Proxy: fetch feed documents through CORS relays with per-attempt timeouts
//! - Feed: parse RSS / Atom documents into raw entries
//! - Sanitize: reduce HTML bodies to clean prose with a minimum length
//! - Image: choose the highest-fidelity image, rejecting thumbnails
//! - Classify: genre tagging, breaking detection and topic filtering
//! - Normalize: run one entry through every gate into a `NewsItem`

pub mod classify;
pub mod error;
pub mod feed;
pub mod image;
pub mod normalize;
pub mod proxy;
pub mod sanitize;
pub mod sources;

pub use classify::{classify, is_banned, Classification};
pub use error::NewsError;
pub use feed::{parse_feed, RawEntry};
pub use image::select_image;
pub use normalize::{normalize_entry, DropReason};
pub use proxy::{FeedFetcher, ProxyConfig, ProxyFetcher, Relay, RelayKind};
pub use sanitize::sanitize;
pub use sources::{get_curated_feeds, get_feature_sources};
