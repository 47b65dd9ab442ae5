//! Curated feed sources

use hub_core::{Category, FeedSource};

/// Curated list of music news feeds, in round-robin order
pub fn get_curated_feeds() -> Vec<FeedSource> {
    vec![
        // Broad music press
        FeedSource::new(
            "Pitchfork",
            "https://pitchfork.com/feed/feed-news/rss",
            Category::Indie,
        ),
        FeedSource::new(
            "Rolling Stone",
            "https://www.rollingstone.com/music/music-news/feed/",
            Category::Rock,
        ),
        FeedSource::new("Billboard", "https://www.billboard.com/feed/", Category::General),
        FeedSource::new("Stereogum", "https://www.stereogum.com/feed/", Category::Indie),
        FeedSource::new(
            "Consequence",
            "https://consequence.net/category/music/feed/",
            Category::Rock,
        ),
        FeedSource::new("NME", "https://www.nme.com/news/music/feed", Category::Rock),
        // Genre desks
        FeedSource::new("JazzTimes", "https://jazztimes.com/feed/", Category::Jazz),
        FeedSource::new(
            "Gramophone",
            "https://www.gramophone.co.uk/feeds/news",
            Category::Classical,
        ),
        FeedSource::new(
            "HotNewHipHop",
            "https://www.hotnewhiphop.com/rss/news.xml",
            Category::HipHopRnb,
        ),
        FeedSource::new(
            "Saving Country Music",
            "https://savingcountrymusic.com/feed/",
            Category::FolkAmericana,
        ),
        FeedSource::new(
            "Resident Advisor",
            "https://ra.co/xml/news.xml",
            Category::Electronic,
        ),
        FeedSource::new("Afropop Worldwide", "https://afropop.org/feed", Category::World),
    ]
}

/// Sources whose items read as artist features, used for artist of the day
pub fn get_feature_sources() -> Vec<String> {
    ["Pitchfork", "Stereogum", "Consequence"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
