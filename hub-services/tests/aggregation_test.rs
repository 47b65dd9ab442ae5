//! End-to-end aggregation runs against an in-memory fetcher

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{rss, source, FakeFetcher, Response, Story};
use hub_core::news::title_slug;
use hub_core::{Category, NewsItem};
use hub_news::image::LOW_RES_SIGNATURES;
use hub_news::sanitize::MIN_DESCRIPTION_LEN;
use hub_services::{Aggregator, AggregatorConfig, SourceFailure, SourceOutcome};

fn aggregator(fetcher: FakeFetcher) -> Aggregator {
    Aggregator::new(Arc::new(fetcher), AggregatorConfig::default())
}

fn summary(items: &[NewsItem]) -> Vec<(String, i64)> {
    items
        .iter()
        .map(|i| (i.source_name.clone(), i.timestamp))
        .collect()
}

#[tokio::test]
async fn test_round_robin_with_recency_per_source() {
    let a = source("Alpha");
    let b = source("Beta");

    let alpha = vec![
        Story::new("Alpha", "Alpha story one", 100),
        Story::new("Alpha", "Alpha story three", 300),
        Story::new("Alpha", "Alpha story two", 200),
    ];
    let beta = vec![
        Story::new("Beta", "Beta story low", 50),
        Story::new("Beta", "Beta story high", 250),
    ];
    let ts = |stories: &[Story], i: usize| stories[i].timestamp();
    // Each pass takes one item per source, so Beta@50 precedes Alpha@100
    // even though a plain recency sort would put it last
    let expected = vec![
        ("Alpha".to_string(), ts(&alpha, 1)),
        ("Beta".to_string(), ts(&beta, 1)),
        ("Alpha".to_string(), ts(&alpha, 2)),
        ("Beta".to_string(), ts(&beta, 0)),
        ("Alpha".to_string(), ts(&alpha, 0)),
    ];

    let fetcher = FakeFetcher::new()
        .with(&a.url, Response::Body(rss("Alpha", &alpha)))
        .with(&b.url, Response::Body(rss("Beta", &beta)));

    let result = aggregator(fetcher).aggregate(&[a, b]).await;

    assert_eq!(summary(&result.items), expected);
    assert_eq!(result.reports[0].outcome, SourceOutcome::Loaded(3));
    assert_eq!(result.reports[1].outcome, SourceOutcome::Loaded(2));
}

#[tokio::test]
async fn test_breaking_item_precedes_newer_regular_items() {
    let a = source("Alpha");
    let stories = vec![
        Story::new("Alpha", "Fresh festival lineup revealed", 500),
        Story::new("Alpha", "A tribute to the late session drummer", 10),
        Story::new("Alpha", "Studio diary from the new record", 400),
    ];
    let fetcher = FakeFetcher::new().with(&a.url, Response::Body(rss("Alpha", &stories)));

    let items = aggregator(fetcher).aggregate(&[a]).await.items;

    assert_eq!(items.len(), 3);
    assert!(items[0].is_breaking);
    assert_eq!(items[0].category, Category::News);
    assert_eq!(items[0].title, "A tribute to the late session drummer");
    assert!(items[1..].iter().all(|i| !i.is_breaking));
}

#[tokio::test]
async fn test_thumbnail_only_entry_is_dropped() {
    let a = source("Alpha");
    let stories = vec![
        Story::new("Alpha", "Small picture story", 100)
            .with_image("https://cdn.example.com/images/photo-thumbnail-150x150.jpg"),
        Story::new("Alpha", "Large picture story", 200),
    ];
    let fetcher = FakeFetcher::new().with(&a.url, Response::Body(rss("Alpha", &stories)));

    let items = aggregator(fetcher).aggregate(&[a]).await.items;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Large picture story");
}

#[tokio::test]
async fn test_failing_and_unparsable_sources_contribute_nothing() {
    let a = source("Alpha");
    let broken = source("Broken");
    let down = source("Down");

    let fetcher = FakeFetcher::new()
        .with(&a.url, Response::Body(rss("Alpha", &[Story::new("Alpha", "Alpha story", 100)])))
        .with(&broken.url, Response::Body("<html><body>Service Unavailable</body></html>".into()))
        .with(&down.url, Response::Fail);

    let result = aggregator(fetcher).aggregate(&[broken, a, down]).await;

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].source_name, "Alpha");
    assert_eq!(result.reports[0].outcome, SourceOutcome::Empty);
    assert_eq!(result.reports[1].outcome, SourceOutcome::Loaded(1));
    assert!(matches!(
        result.reports[2].outcome,
        SourceOutcome::Failed(SourceFailure::Fetch(_))
    ));
}

#[tokio::test]
async fn test_all_sources_failing_yields_empty_list() {
    let sources = vec![source("Alpha"), source("Beta")];
    let result = aggregator(FakeFetcher::new()).aggregate(&sources).await;

    assert!(result.items.is_empty());
    assert_eq!(result.reports.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_source_times_out_without_blocking_others() {
    let a = source("Alpha");
    let slow = source("Slow");
    let fetcher = FakeFetcher::new()
        .with(&a.url, Response::Body(rss("Alpha", &[Story::new("Alpha", "Alpha story", 100)])))
        .with(&slow.url, Response::Hang);

    let result = aggregator(fetcher).aggregate(&[slow, a]).await;

    assert_eq!(result.items.len(), 1);
    assert_eq!(
        result.reports[0].outcome,
        SourceOutcome::Failed(SourceFailure::TimedOut)
    );
}

#[tokio::test]
async fn test_output_quality_and_dedup() {
    let a = source("Alpha");
    let b = source("Beta");
    let shared = "Headliners confirmed for the spring festival weekend";

    let alpha = vec![
        Story::new("Alpha", shared, 300),
        Story::new("Alpha", "Short one", 250).with_body("<p>Listen now.</p>"),
        Story::new("Alpha", "Second alpha story", 200)
            .with_image("https://cdn.example.com/authors/avatar.png"),
        Story::new("Alpha", "Third alpha story", 150),
    ];
    let beta = vec![
        Story::new("Beta", &shared.to_uppercase(), 290),
        Story::new("Beta", "Second beta story", 100),
    ];
    let fetcher = FakeFetcher::new()
        .with(&a.url, Response::Body(rss("Alpha", &alpha)))
        .with(&b.url, Response::Body(rss("Beta", &beta)));

    let items = aggregator(fetcher).aggregate(&[a, b]).await.items;

    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec![shared, "Second beta story", "Third alpha story"]);

    for item in &items {
        assert!(item.description.chars().count() >= MIN_DESCRIPTION_LEN);
        assert!(!item.image.is_empty());
        let image = item.image.to_lowercase();
        assert!(LOW_RES_SIGNATURES.iter().all(|sig| !image.contains(sig)));
    }

    let mut slugs: Vec<_> = items.iter().map(|i| title_slug(&i.title)).collect();
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), items.len());
}

#[tokio::test]
async fn test_fairness_and_breaking_order() {
    let names = ["Alpha", "Beta", "Gamma"];
    let sources: Vec<_> = names.iter().map(|n| source(n)).collect();

    let mut fetcher = FakeFetcher::new();
    for (name, src) in names.iter().zip(&sources) {
        let mut stories: Vec<_> = (1..=8)
            .map(|k| Story::new(name, &format!("{} regular story number {}", name, k), k * 10))
            .collect();
        stories.push(Story::new(
            name,
            &format!("{} founder dies after long illness", name),
            (name.len() as i64) * 7,
        ));
        fetcher = fetcher.with(&src.url, Response::Body(rss(name, &stories)));
    }

    let items = aggregator(fetcher).aggregate(&sources).await.items;

    let breaking: Vec<_> = items.iter().filter(|i| i.is_breaking).collect();
    assert_eq!(breaking.len(), 3);
    assert!(breaking.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let first_regular = items.iter().position(|i| !i.is_breaking).unwrap();
    assert!(items[first_regular..].iter().all(|i| !i.is_breaking));

    // Every complete round holds exactly one item per source
    let regular = &items[first_regular..];
    for round in regular.chunks(names.len()) {
        let mut per_source: HashMap<&str, usize> = HashMap::new();
        for item in round {
            *per_source.entry(item.source_name.as_str()).or_default() += 1;
        }
        assert!(per_source.values().all(|&n| n == 1));
    }
    assert_eq!(items.len(), 3 + 3 * 8);
}
