//! Keyword classification
//!
//! All rules are plain data tables so the classifier stays a pure function
//! over configuration. Breaking and genre terms match on word boundaries;
//! banned topics match as stems that must start a word.

use hub_core::Category;

/// Title phrases that mark an item as breaking (mortality / crisis)
pub const BREAKING_PHRASES: &[&str] = &[
    "dies",
    "died",
    "dead at",
    "death of",
    "passed away",
    "passes away",
    "obituary",
    "tribute to the late",
    "in memoriam",
    "killed",
    "r.i.p",
    "rest in peace",
];

/// Topics the hub never publishes, matched as word-initial stems
pub const BANNED_TOPICS: &[&str] = &[
    "politic",
    "government",
    "election",
    "senate",
    "congress",
    "parliament",
    "legislat",
    "white house",
    "democrat",
    "republican",
    "vaccine",
    "covid",
    "pandemic",
    "healthcare",
    "health care",
    "medicare",
    "medicaid",
    "abortion",
    "immigration",
    "tariff",
];

/// Ordered genre rules; the first group with a matching term wins
pub const GENRE_RULES: &[(Category, &[&str])] = &[
    (
        Category::Classical,
        &[
            "classical", "orchestra", "orchestral", "symphony", "philharmonic", "opera",
            "concerto", "sonata", "conductor", "pianist", "violinist", "cellist", "chamber music",
            "composer",
        ],
    ),
    (
        Category::Jazz,
        &["jazz", "bebop", "big band", "saxophonist", "trumpeter", "blue note", "swing"],
    ),
    (
        Category::HipHopRnb,
        &[
            "hip-hop", "hip hop", "rap", "rapper", "r&b", "rnb", "trap", "mixtape", "drill",
            "neo-soul",
        ],
    ),
    (
        Category::FolkAmericana,
        &[
            "folk", "americana", "country", "bluegrass", "singer-songwriter", "nashville",
            "banjo", "roots music",
        ],
    ),
    (
        Category::Rock,
        &["rock", "metal", "punk", "grunge", "hardcore", "guitarist", "riff", "shoegaze"],
    ),
    (
        Category::Electronic,
        &[
            "electronic", "techno", "house music", "edm", "dj", "dance music", "synth",
            "ambient", "rave", "drum and bass",
        ],
    ),
    (
        Category::Indie,
        &["indie", "lo-fi", "bedroom pop", "dream pop", "alt-pop", "debut ep"],
    ),
];

/// Outcome of classifying one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub is_breaking: bool,
}

/// Classify an entry by its title and sanitized description.
///
/// Breaking items always get [`Category::News`]; otherwise the first genre
/// group with a match wins, falling back to `default_category`.
pub fn classify(title: &str, description: &str, default_category: Category) -> Classification {
    if is_breaking(title) {
        return Classification {
            category: Category::News,
            is_breaking: true,
        };
    }

    let text = format!("{} {}", title, description).to_lowercase();
    let category = GENRE_RULES
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| contains_term(&text, term)))
        .map(|(category, _)| *category)
        .unwrap_or(default_category);

    Classification {
        category,
        is_breaking: false,
    }
}

/// Whether a title reads as breaking news
pub fn is_breaking(title: &str) -> bool {
    let title = title.to_lowercase();
    BREAKING_PHRASES
        .iter()
        .any(|phrase| contains_term(&title, phrase))
}

/// Whether an entry touches a topic the hub does not cover
pub fn is_banned(title: &str, description: &str) -> bool {
    let text = format!("{} {}", title, description).to_lowercase();
    BANNED_TOPICS.iter().any(|topic| contains_stem(&text, topic))
}

/// Find `term` in `text` with non-alphanumeric characters (or the string
/// edges) on both sides. Both must already be lower-cased.
fn contains_term(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(start, matched)| {
        let end = start + matched.len();
        let after = text[end..].chars().next();
        !alphanumeric_before(text, start) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Find `stem` at the start of a word; any suffix is allowed
fn contains_stem(text: &str, stem: &str) -> bool {
    text.match_indices(stem)
        .any(|(start, _)| !alphanumeric_before(text, start))
}

fn alphanumeric_before(text: &str, index: usize) -> bool {
    text[..index].chars().next_back().is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_forces_news_category() {
        let result = classify(
            "A tribute to the late jazz pianist who changed everything",
            "Orchestra members gathered in his memory.",
            Category::Jazz,
        );
        assert!(result.is_breaking);
        assert_eq!(result.category, Category::News);

        assert!(is_breaking("Legendary Drummer Dies At 81"));
        assert!(is_breaking("Singer killed in tour bus crash"));
        assert!(!is_breaking("Studies in sound: a new ambient record"));
    }

    #[test]
    fn test_first_matching_group_wins() {
        // "symphony" (classical) outranks "rock"
        let result = classify("Rock band records with a symphony", "", Category::General);
        assert_eq!(result.category, Category::Classical);

        let result = classify("New hip-hop mixtape drops", "", Category::General);
        assert_eq!(result.category, Category::HipHopRnb);
    }

    #[test]
    fn test_word_boundaries() {
        // "therapy" must not match "rap", "drumming" must not match "rum"
        let result = classify("Music therapy sessions", "Drumming circles", Category::World);
        assert_eq!(result.category, Category::World);

        assert!(contains_term("the r&b chart", "r&b"));
        assert!(contains_term("dj set", "dj"));
        assert!(!contains_term("adjust", "dj"));
    }

    #[test]
    fn test_falls_back_to_default_category() {
        let result = classify("Festival lineup announced", "Tickets on sale Friday.", Category::Indie);
        assert_eq!(result.category, Category::Indie);
        assert!(!result.is_breaking);
    }

    #[test]
    fn test_banned_topics() {
        assert!(is_banned("Songwriter runs for Senate", ""));
        assert!(is_banned("Festival", "Political fallout from the new tariff rules"));
        assert!(!is_banned("Festival lineup announced", "Three stages of music."));
    }

    #[test]
    fn test_banned_stems_start_a_word() {
        assert!(!is_banned(
            "A selection of rare Coltrane recordings resurfaces",
            "The box set collects a careful selection of live takes."
        ));
        assert!(!is_banned("Reelection of the festival board", ""));
        assert!(is_banned("Election night playlist", ""));
        assert!(is_banned("Rapper's politically charged single", ""));
    }
}
