//! Image selection
//!
//! Every published item needs one illustrative image. Candidates come from
//! media extension nodes and image enclosures first; inline `<img>` tags in
//! the body are only consulted when those yield nothing. Anything that looks
//! like a thumbnail, avatar, tracking pixel or otherwise small image is
//! rejected outright.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::feed::RawEntry;

/// Minimum width (declared or inferred from the URL) of an acceptable image
pub const MIN_IMAGE_WIDTH: u32 = 600;

/// URLs shorter than this are never real CDN images
pub const MIN_IMAGE_URL_LEN: usize = 20;

/// Score for media-extension and enclosure candidates
const FEED_MEDIA_SCORE: u32 = 100;
/// Score for images scraped from the body
const INLINE_IMAGE_SCORE: u32 = 90;

/// Substrings that mark a low-resolution or placeholder image
pub const LOW_RES_SIGNATURES: &[&str] = &[
    "thumbnail",
    "thumb",
    "avatar",
    "gravatar",
    "favicon",
    "icon",
    "logo",
    "placeholder",
    "spacer",
    "pixel",
    "1x1",
    "blank.gif",
    "default-image",
    "feeds.feedburner.com",
    "-150x150",
    "-100x100",
    "50x50",
    "75x75",
    "100x100",
    "150x150",
];

static DIMENSION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2,4})x(\d{2,4})").expect("valid regex"));
static SIZE_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[?&](w|width|resize|size|s)=([a-z0-9]+)").expect("valid regex")
});

/// Where a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Media,
    Enclosure,
    Inline,
}

/// A possible image for an entry, before scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub width: Option<u32>,
    pub origin: CandidateOrigin,
}

/// Pick the highest-fidelity image for an entry.
///
/// Returns `None` when every candidate is rejected, which means the entry
/// cannot be published.
pub fn select_image(entry: &RawEntry) -> Option<String> {
    candidates(entry)
        .into_iter()
        .filter_map(|candidate| {
            let url = absolutize(&candidate.url, &entry.link)?;
            let score = score(&url, &candidate)?;
            Some((score, url))
        })
        // Strictly-greater keeps the first seen on ties
        .fold(None, |best: Option<(u32, String)>, (score, url)| match best {
            Some((best_score, _)) if best_score >= score => best,
            _ => Some((score, url)),
        })
        .map(|(_, url)| url)
}

/// Build the candidate list in priority order
pub fn candidates(entry: &RawEntry) -> Vec<ImageCandidate> {
    let mut found: Vec<ImageCandidate> = entry
        .media
        .iter()
        .filter(|m| {
            let medium_is_image = m.medium.as_deref() == Some("image");
            let mime_is_image = m
                .mime_type
                .as_deref()
                .is_some_and(|t| t.starts_with("image/"));
            medium_is_image
                || mime_is_image
                || m.width.is_some()
                || m.height.is_some()
                || has_image_extension(&m.url)
        })
        .map(|m| ImageCandidate {
            url: m.url.clone(),
            width: m.width,
            origin: CandidateOrigin::Media,
        })
        .collect();

    found.extend(
        entry
            .enclosures
            .iter()
            .filter(|e| e.mime_type.starts_with("image/") || has_image_extension(&e.url))
            .map(|e| ImageCandidate {
                url: e.url.clone(),
                width: None,
                origin: CandidateOrigin::Enclosure,
            }),
    );

    if found.is_empty() {
        found.extend(inline_images(&entry.body).into_iter().map(|(url, width)| {
            ImageCandidate {
                url,
                width,
                origin: CandidateOrigin::Inline,
            }
        }));
    }

    found
}

/// Score a candidate by its resolved URL; `None` means rejected
fn score(resolved_url: &str, candidate: &ImageCandidate) -> Option<u32> {
    if is_low_resolution(resolved_url) {
        return None;
    }
    if candidate.width.is_some_and(|w| w < MIN_IMAGE_WIDTH) {
        return None;
    }

    Some(match candidate.origin {
        CandidateOrigin::Media | CandidateOrigin::Enclosure => FEED_MEDIA_SCORE,
        CandidateOrigin::Inline => INLINE_IMAGE_SCORE,
    })
}

/// Whether a URL carries any low-resolution signature
pub fn is_low_resolution(url: &str) -> bool {
    let url = url.trim();
    if url.len() < MIN_IMAGE_URL_LEN {
        return true;
    }

    let lower = url.to_lowercase();
    if LOW_RES_SIGNATURES.iter().any(|sig| lower.contains(sig)) {
        return true;
    }

    let small_dimensions = DIMENSION_TOKEN.captures_iter(&lower).any(|caps| {
        caps[1]
            .parse::<u32>()
            .is_ok_and(|width| width < MIN_IMAGE_WIDTH)
    });
    if small_dimensions {
        return true;
    }

    SIZE_PARAM.captures_iter(&lower).any(|caps| match caps[2].parse::<u32>() {
        Ok(size) => size < MIN_IMAGE_WIDTH,
        Err(_) => matches!(&caps[2], "small" | "thumb" | "thumbnail" | "tiny" | "xs" | "sm"),
    })
}

fn has_image_extension(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
    [".jpg", ".jpeg", ".png", ".webp", ".avif", ".gif"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

/// `<img>` sources in the body, with any declared width
fn inline_images(html: &str) -> Vec<(String, Option<u32>)> {
    if !html.contains("<img") {
        return Vec::new();
    }

    let Ok(selector) = Selector::parse("img") else {
        return Vec::new();
    };

    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selector)
        .filter_map(|img| {
            let value = img.value();
            let src = value
                .attr("src")
                .filter(|s| !s.trim().is_empty() && !s.starts_with("data:"))
                .or_else(|| value.attr("data-src"))?;
            let width = value.attr("width").and_then(|w| w.trim().parse().ok());
            Some((src.trim().to_string(), width))
        })
        .collect()
}

/// Resolve relative and protocol-relative URLs against the article link
fn absolutize(candidate: &str, base: &str) -> Option<String> {
    let resolved = match Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base).ok()?.join(candidate).ok()?,
        Err(_) => return None,
    };

    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}
