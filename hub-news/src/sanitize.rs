//! HTML snippet sanitizing
//!
//! Feed bodies arrive as HTML of wildly varying quality. Sanitizing keeps
//! only readable prose: scripts, styles and known boilerplate containers are
//! dropped, feed-engine trailers are cut, entities are decoded and whitespace
//! is collapsed. Anything left under the minimum length is rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

/// Shortest description the hub will publish
pub const MIN_DESCRIPTION_LEN: usize = 100;

/// Elements whose text never belongs in a summary
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "object", "embed", "svg", "footer", "figure",
    "figcaption", "form", "button",
];

/// Elements that break the text flow; inline elements join their neighbours
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "hr", "li", "ul", "ol", "dl", "dt", "dd", "h1", "h2", "h3", "h4", "h5",
    "h6", "blockquote", "pre", "table", "tr", "td", "th", "section", "article", "header",
    "aside",
];

static BOILERPLATE_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(ad|ads|advert\w*|sponsor\w*|share\w*|social\w*|newsletter\w*|related\w*|feedflare|footer\w*)\b")
        .expect("valid regex")
});
static TRUNCATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*(?:\.{3}|…)\s*\]").expect("valid regex"));
static POST_TRAILER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\s*\bthe post\b.*?\bappeared first on\b.*$").expect("valid regex")
});
static READ_MORE_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:continue reading|read more)\s*(?:…|\.{3}|»|→|\.)?\s*$")
        .expect("valid regex")
});

/// Sanitize an HTML snippet, rejecting output under [`MIN_DESCRIPTION_LEN`].
pub fn sanitize(html: &str) -> String {
    sanitize_with_min(html, MIN_DESCRIPTION_LEN)
}

/// Sanitize an HTML snippet; returns an empty string when the readable text
/// is shorter than `min_len` characters.
pub fn sanitize_with_min(html: &str, min_len: usize) -> String {
    let text = plain_text(html);
    if text.chars().count() < min_len {
        return String::new();
    }
    text
}

/// Readable text of an HTML snippet with no length gate applied
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut raw);

    // Feeds frequently double-encode, so decode what the parser left behind
    let decoded = html_escape::decode_html_entities(&raw);
    let collapsed = collapse_whitespace(&decoded);

    let without_markers = TRUNCATION_MARKER.replace_all(&collapsed, "");
    let without_trailer = POST_TRAILER.replace(&without_markers, "");
    let cleaned = READ_MORE_TAIL.replace(&without_trailer, "");

    collapse_whitespace(&cleaned)
}

/// Decode a headline for display
pub fn decode_title(raw: &str) -> String {
    collapse_whitespace(&html_escape::decode_html_entities(raw))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_boilerplate(&child) {
                    continue;
                }
                collect_text(child, out);
                if BLOCK_TAGS.contains(&child.value().name()) {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn is_boilerplate(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if SKIPPED_TAGS.contains(&value.name()) {
        return true;
    }
    value
        .attr("class")
        .into_iter()
        .chain(value.id())
        .any(|names| BOILERPLATE_CONTAINER.is_match(names))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
