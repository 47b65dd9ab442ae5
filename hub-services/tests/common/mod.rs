//! Shared fixtures: an in-memory `FeedFetcher` and an RSS document builder

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use hub_core::{Category, FeedSource};
use hub_news::{FeedFetcher, NewsError};

/// 2026-10-16T12:00:00Z
pub const BASE_MS: i64 = 1_792_152_000_000;

pub enum Response {
    Body(String),
    Fail,
    /// Never answers within any sane budget
    Hang,
}

#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Response>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, response: Response) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, NewsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(url) {
            Some(Response::Body(body)) => Ok(body.clone()),
            Some(Response::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(NewsError::Timeout(3600))
            }
            Some(Response::Fail) | None => Err(NewsError::AllRelaysFailed(url.to_string())),
        }
    }
}

pub fn source(name: &str) -> FeedSource {
    FeedSource::new(
        name,
        &format!("https://{}.example.com/feed", name.to_lowercase()),
        Category::General,
    )
}

/// One `<item>` of a fixture feed
pub struct Story {
    pub title: String,
    /// Offset from [`BASE_MS`] in minutes
    pub minute: i64,
    pub image: String,
    pub body: String,
}

impl Story {
    /// A story that passes every quality gate
    pub fn new(source: &str, title: &str, minute: i64) -> Self {
        Self {
            title: title.to_string(),
            minute,
            image: format!(
                "https://cdn.example.com/images/{}-{}-hero.jpg",
                source.to_lowercase(),
                minute
            ),
            body: format!(
                "<p>{}. The band spent the summer rehearsing in a converted barn outside town, \
                 and the new songs carry that unhurried, open-air feeling throughout.</p>",
                title
            ),
        }
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.image = url.to_string();
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn timestamp(&self) -> i64 {
        BASE_MS + self.minute * 60_000
    }
}

pub fn rss(source: &str, stories: &[Story]) -> String {
    let items: String = stories
        .iter()
        .map(|story| {
            let published = Utc
                .timestamp_millis_opt(story.timestamp())
                .single()
                .map(|t| t.to_rfc2822())
                .unwrap_or_default();
            format!(
                r#"<item>
  <title>{title}</title>
  <link>https://{host}.example.com/news/{minute}</link>
  <pubDate>{published}</pubDate>
  <description><![CDATA[{body}]]></description>
  <enclosure url="{image}" type="image/jpeg" length="1000"/>
</item>
"#,
                title = story.title,
                host = source.to_lowercase(),
                minute = story.minute,
                published = published,
                body = story.body,
                image = story.image,
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>{source}</title>
  <link>https://{host}.example.com</link>
  <description>{source} news</description>
{items}</channel>
</rss>"#,
        source = source,
        host = source.to_lowercase(),
        items = items,
    )
}
