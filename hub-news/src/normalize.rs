//! Raw entry → publishable news item

use std::fmt;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use hub_core::news::{display_date, TITLE_SLUG_LEN};
use hub_core::{FeedSource, NewsItem};

use crate::classify::{classify, is_banned};
use crate::feed::{resolve_timestamp, RawEntry};
use crate::image::select_image;
use crate::sanitize::{decode_title, sanitize_with_min, MIN_DESCRIPTION_LEN};

/// Why an entry did not become a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingTitle,
    TooShort,
    BannedTopic,
    NoImage,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DropReason::MissingTitle => "missing title",
            DropReason::TooShort => "description too short",
            DropReason::BannedTopic => "banned topic",
            DropReason::NoImage => "no qualifying image",
        };
        write!(f, "{}", reason)
    }
}

/// Run one entry through every quality gate and build the item.
///
/// Gates run cheapest first: title, description length, banned topics,
/// then image selection. Classification only happens for survivors.
pub fn normalize_entry(
    entry: &RawEntry,
    source: &FeedSource,
    now: DateTime<Utc>,
) -> Result<NewsItem, DropReason> {
    normalize_entry_with_min(entry, source, now, MIN_DESCRIPTION_LEN)
}

pub fn normalize_entry_with_min(
    entry: &RawEntry,
    source: &FeedSource,
    now: DateTime<Utc>,
    min_description_len: usize,
) -> Result<NewsItem, DropReason> {
    let title = decode_title(&entry.title);
    if title.is_empty() {
        return Err(DropReason::MissingTitle);
    }

    let description = sanitize_with_min(&entry.body, min_description_len);
    if description.is_empty() {
        return Err(DropReason::TooShort);
    }

    if is_banned(&title, &description) {
        return Err(DropReason::BannedTopic);
    }

    let image = select_image(entry).ok_or(DropReason::NoImage)?;

    let classification = classify(&title, &description, source.default_category);
    let timestamp = resolve_timestamp(entry.published.as_deref(), &entry.link, now);
    let source_url = if entry.link.is_empty() {
        source.url.clone()
    } else {
        entry.link.clone()
    };

    Ok(NewsItem {
        id: item_id(&source.name, timestamp, &title),
        title,
        category: classification.category,
        is_breaking: classification.is_breaking,
        date: display_date(timestamp),
        timestamp,
        image,
        description,
        source_name: source.name.clone(),
        source_url,
    })
}

/// `{source-slug}-{hash}` over source name, timestamp and title prefix
pub fn item_id(source_name: &str, timestamp: i64, title: &str) -> String {
    let prefix: String = title.chars().take(TITLE_SLUG_LEN).collect();

    let mut hasher = Sha256::new();
    hasher.update(source_name.as_bytes());
    hasher.update(b"|");
    hasher.update(timestamp.to_be_bytes());
    hasher.update(b"|");
    hasher.update(prefix.as_bytes());

    format!(
        "{}-{}",
        slugify(source_name),
        hex::encode(&hasher.finalize()[..8])
    )
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
