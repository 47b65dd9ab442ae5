//! Derived views over the aggregated news list
//!
//! Small read-only projections the UI shows next to the feed. None of these
//! touch the network; they only reshape items the aggregator already built.

use rand::seq::IndexedRandom;
use rand::Rng;

use hub_core::{ArtistBio, NewsItem, Quote, SourceLink};

/// Longest biography shown on the artist card, in sentences
pub const MAX_BIO_SENTENCES: usize = 4;

/// Build the artist-of-the-day card from the news list.
///
/// Items from a feature source win; otherwise the top item is used.
/// Returns `None` for an empty list.
pub fn artist_of_the_day(items: &[NewsItem], feature_sources: &[String]) -> Option<ArtistBio> {
    let item = items
        .iter()
        .find(|item| {
            feature_sources
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&item.source_name))
        })
        .or_else(|| items.first())?;

    Some(ArtistBio {
        name: item.title.clone(),
        biography: sentences(&item.description, MAX_BIO_SENTENCES),
        portrait_url: item.image.clone(),
        youtube_id: String::new(),
        genre: item.category.label().to_string(),
        location: item.source_name.clone(),
        achievements: Vec::new(),
        sources: vec![SourceLink {
            uri: item.source_url.clone(),
            title: item.source_name.clone(),
        }],
    })
}

/// A headline from a uniformly random item, attributed to its source
pub fn quote_of_the_moment<R: Rng + ?Sized>(items: &[NewsItem], rng: &mut R) -> Option<Quote> {
    items.choose(rng).map(|item| Quote {
        text: item.title.clone(),
        author: item.source_name.clone(),
    })
}

/// Case-insensitive title search. A blank query matches nothing.
pub fn search<'a>(items: &'a [NewsItem], query: &str) -> Vec<&'a NewsItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| item.title.to_lowercase().contains(&query))
        .collect()
}

pub fn find_by_id<'a>(items: &'a [NewsItem], id: &str) -> Option<&'a NewsItem> {
    items.iter().find(|item| item.id == id)
}

/// First `max` sentences of `text`. Terminal punctuation stays attached.
fn sentences(text: &str, max: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if out.len() >= max {
            break;
        }
        let ends_sentence = matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if ends_sentence {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence.to_string());
            }
            start = end;
        }
    }

    if out.len() < max {
        let rest = text[start..].trim();
        if !rest.is_empty() {
            out.push(rest.to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str, source: &str, title: &str) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: title.to_string(),
            category: Category::Jazz,
            is_breaking: false,
            date: "OCT 16, 2026".to_string(),
            timestamp: 1_792_152_000_000,
            image: "https://cdn.example.com/hero-image.jpg".to_string(),
            description: "First sentence here. Second one follows! Is this the third? \
                Fourth sentence. Fifth is dropped."
                .to_string(),
            source_name: source.to_string(),
            source_url: format!("https://{}.example.com/story", source.to_lowercase()),
        }
    }

    #[test]
    fn test_artist_prefers_feature_source() {
        let items = vec![
            item("a", "Billboard", "Chart news"),
            item("b", "Pitchfork", "Profile of a pianist"),
        ];
        let bio = artist_of_the_day(&items, &["pitchfork".to_string()]).unwrap();

        assert_eq!(bio.name, "Profile of a pianist");
        assert_eq!(bio.genre, "Jazz");
        assert_eq!(bio.portrait_url, "https://cdn.example.com/hero-image.jpg");
        assert_eq!(bio.sources[0].uri, "https://pitchfork.example.com/story");
        assert_eq!(
            bio.biography,
            vec![
                "First sentence here.",
                "Second one follows!",
                "Is this the third?",
                "Fourth sentence."
            ]
        );
    }

    #[test]
    fn test_artist_falls_back_to_first_item() {
        let items = vec![item("a", "Billboard", "Chart news")];
        let bio = artist_of_the_day(&items, &["Pitchfork".to_string()]).unwrap();
        assert_eq!(bio.name, "Chart news");

        assert!(artist_of_the_day(&[], &[]).is_none());
    }

    #[test]
    fn test_sentences_without_terminal_punctuation() {
        assert_eq!(sentences("Version 2.0 is out", 4), vec!["Version 2.0 is out"]);
        assert_eq!(sentences("One. Two", 4), vec!["One.", "Two"]);
        assert!(sentences("   ", 4).is_empty());
    }

    #[test]
    fn test_quote_is_drawn_from_items() {
        let items = vec![item("a", "NME", "Headline A"), item("b", "Stereogum", "Headline B")];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let quote = quote_of_the_moment(&items, &mut rng).unwrap();
            assert!(items
                .iter()
                .any(|i| i.title == quote.text && i.source_name == quote.author));
        }
        assert!(quote_of_the_moment(&[], &mut rng).is_none());
    }

    #[test]
    fn test_search_and_lookup() {
        let items = vec![
            item("a", "NME", "Blur announce reunion tour"),
            item("b", "NME", "New Radiohead box set"),
        ];

        let hits = search(&items, "  REUNION ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
        assert!(search(&items, "").is_empty());

        assert_eq!(find_by_id(&items, "b").map(|i| i.title.as_str()), Some("New Radiohead box set"));
        assert!(find_by_id(&items, "missing").is_none());
    }
}
