//! Feed document parsing
//!
//! Turns one RSS or Atom document into raw, unfiltered entries. Nothing is
//! judged here: quality gates, image scoring and classification all happen
//! downstream. A document neither parser accepts yields no entries.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// An image-bearing media extension node (`media:content`, `media:thumbnail`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaNode {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub medium: Option<String>,
    pub mime_type: Option<String>,
}

/// An `<enclosure>` (RSS) or `rel="enclosure"` link (Atom)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: String,
}

/// One feed item as found in the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    /// Publish date exactly as the feed states it
    pub published: Option<String>,
    /// Richest available body: full content if present, else the summary
    pub body: String,
    pub media: Vec<MediaNode>,
    pub enclosures: Vec<Enclosure>,
}

/// Parse a feed document into its entries, in document order.
pub fn parse_feed(xml: &str) -> Vec<RawEntry> {
    let xml = trim_to_document(xml);

    if let Ok(channel) = rss::Channel::read_from(xml.as_bytes()) {
        return channel.items().iter().map(rss_entry).collect();
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(xml.as_bytes()) {
        return feed.entries().iter().map(atom_entry).collect();
    }

    debug!("Document is neither RSS nor Atom ({} bytes)", xml.len());
    Vec::new()
}

/// Skip a BOM or relay junk before the document root
fn trim_to_document(xml: &str) -> &str {
    let xml = xml.trim_start_matches('\u{FEFF}').trim();
    ["<?xml", "<rss", "<feed", "<rdf:RDF"]
        .iter()
        .filter_map(|marker| xml.find(marker))
        .min()
        .map(|start| &xml[start..])
        .unwrap_or(xml)
}

fn rss_entry(item: &rss::Item) -> RawEntry {
    let body = item
        .content()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| item.description())
        .unwrap_or_default()
        .to_string();

    let link = item
        .link()
        .map(str::to_string)
        .or_else(|| {
            item.guid()
                .filter(|g| g.is_permalink())
                .map(|g| g.value().to_string())
        })
        .unwrap_or_default();

    let published = item.pub_date().map(str::to_string).or_else(|| {
        item.dublin_core_ext()
            .and_then(|dc| dc.dates().first().cloned())
    });

    let enclosures = item
        .enclosure()
        .map(|e| Enclosure {
            url: e.url().to_string(),
            mime_type: e.mime_type().to_string(),
        })
        .into_iter()
        .collect();

    RawEntry {
        title: item.title().unwrap_or_default().to_string(),
        link,
        published,
        body,
        media: media_nodes(item.extensions()),
        enclosures,
    }
}

fn atom_entry(entry: &atom_syndication::Entry) -> RawEntry {
    let content = entry.content().and_then(|c| c.value()).unwrap_or_default();
    let body = if content.trim().is_empty() {
        entry.summary().map(|s| s.as_str()).unwrap_or_default()
    } else {
        content
    };

    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href().to_string())
        .unwrap_or_default();

    let published = entry
        .published()
        .unwrap_or_else(|| entry.updated())
        .to_rfc3339();

    let enclosures = entry
        .links()
        .iter()
        .filter(|l| l.rel() == "enclosure")
        .map(|l| Enclosure {
            url: l.href().to_string(),
            mime_type: l.mime_type().unwrap_or_default().to_string(),
        })
        .collect();

    RawEntry {
        title: entry.title().as_str().to_string(),
        link,
        published: Some(published),
        body: body.to_string(),
        media: media_nodes(entry.extensions()),
        enclosures,
    }
}

/// Common view over the RSS and Atom extension node types
trait ExtensionNode: Sized {
    fn attributes(&self) -> &BTreeMap<String, String>;
    fn child_nodes(&self) -> &BTreeMap<String, Vec<Self>>;
}

impl ExtensionNode for rss::extension::Extension {
    fn attributes(&self) -> &BTreeMap<String, String> {
        self.attrs()
    }

    fn child_nodes(&self) -> &BTreeMap<String, Vec<Self>> {
        self.children()
    }
}

impl ExtensionNode for atom_syndication::extension::Extension {
    fn attributes(&self) -> &BTreeMap<String, String> {
        self.attrs()
    }

    fn child_nodes(&self) -> &BTreeMap<String, Vec<Self>> {
        self.children()
    }
}

/// Collect media nodes, including those nested in `media:group`
fn media_nodes<E: ExtensionNode>(extensions: &BTreeMap<String, BTreeMap<String, Vec<E>>>) -> Vec<MediaNode> {
    let Some(media) = extensions.get("media") else {
        return Vec::new();
    };

    let mut nodes = Vec::new();
    collect_media(media, &mut nodes);
    if let Some(groups) = media.get("group") {
        for group in groups {
            collect_media(group.child_nodes(), &mut nodes);
        }
    }
    nodes
}

fn collect_media<E: ExtensionNode>(elements: &BTreeMap<String, Vec<E>>, out: &mut Vec<MediaNode>) {
    for name in ["content", "thumbnail"] {
        for element in elements.get(name).into_iter().flatten() {
            let attrs = element.attributes();
            let Some(url) = attrs.get("url").filter(|u| !u.trim().is_empty()) else {
                continue;
            };
            out.push(MediaNode {
                url: url.trim().to_string(),
                width: attrs.get("width").and_then(|w| w.trim().parse().ok()),
                height: attrs.get("height").and_then(|h| h.trim().parse().ok()),
                medium: attrs.get("medium").cloned(),
                mime_type: attrs.get("type").cloned(),
            });
        }
    }
}

/// Resolve an entry's publish time to epoch milliseconds.
///
/// Tries RFC 2822, then RFC 3339, then a date embedded in the article URL,
/// and finally falls back to `now`.
pub fn resolve_timestamp(published: Option<&str>, link: &str, now: DateTime<Utc>) -> i64 {
    published
        .map(str::trim)
        .and_then(|p| {
            DateTime::parse_from_rfc2822(p)
                .or_else(|_| DateTime::parse_from_rfc3339(p))
                .ok()
        })
        .map(|d| d.with_timezone(&Utc))
        .or_else(|| extract_date_from_url(link))
        .unwrap_or(now)
        .timestamp_millis()
}

static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d{4})/(\d{1,2})/(\d{1,2})/").expect("valid regex"));
static DASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/-](\d{4})-(\d{2})-(\d{2})[/-]").expect("valid regex"));

/// Extract a date from URL patterns like `/2025/12/09/` or `/2025-12-09/`
fn extract_date_from_url(url: &str) -> Option<DateTime<Utc>> {
    for pattern in [&*SLASH_DATE, &*DASH_DATE] {
        let Some(caps) = pattern.captures(url) else {
            continue;
        };
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let day: u32 = caps.get(3)?.as_str().parse().ok()?;

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(DateTime::from_naive_utc_and_offset(
                date.and_hms_opt(12, 0, 0)?,
                Utc,
            ));
        }
    }

    None
}
