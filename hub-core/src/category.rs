//! Genre categories for news items

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag attached to every news item.
///
/// `News` is the distinguished tag forced onto breaking items; the rest
/// are genre buckets assigned by keyword classification or taken from the
/// source's configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "News")]
    News,
    #[serde(rename = "Jazz")]
    Jazz,
    #[serde(rename = "Classical")]
    Classical,
    #[serde(rename = "Indie")]
    Indie,
    #[serde(rename = "Electronic")]
    Electronic,
    #[serde(rename = "Folk/Americana")]
    FolkAmericana,
    #[serde(rename = "Hip-Hop/R&B")]
    HipHopRnb,
    #[serde(rename = "World")]
    World,
    #[serde(rename = "Rock")]
    Rock,
    #[serde(rename = "General")]
    General,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 10] = [
        Category::News,
        Category::Jazz,
        Category::Classical,
        Category::Indie,
        Category::Electronic,
        Category::FolkAmericana,
        Category::HipHopRnb,
        Category::World,
        Category::Rock,
        Category::General,
    ];

    /// Get the label shown in the UI (matches the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Jazz => "Jazz",
            Category::Classical => "Classical",
            Category::Indie => "Indie",
            Category::Electronic => "Electronic",
            Category::FolkAmericana => "Folk/Americana",
            Category::HipHopRnb => "Hip-Hop/R&B",
            Category::World => "World",
            Category::Rock => "Rock",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "news" | "breaking" => Ok(Category::News),
            "jazz" => Ok(Category::Jazz),
            "classical" => Ok(Category::Classical),
            "indie" => Ok(Category::Indie),
            "electronic" => Ok(Category::Electronic),
            "folk/americana" | "folk" | "americana" => Ok(Category::FolkAmericana),
            "hip-hop/r&b" | "hip-hop" | "hiphop" | "r&b" => Ok(Category::HipHopRnb),
            "world" => Ok(Category::World),
            "rock" => Ok(Category::Rock),
            "general" => Ok(Category::General),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_label() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("Hip-Hop/R&B".parse::<Category>(), Ok(Category::HipHopRnb));
        assert_eq!("folk".parse::<Category>(), Ok(Category::FolkAmericana));
        assert_eq!("BREAKING".parse::<Category>(), Ok(Category::News));
        assert!("polka".parse::<Category>().is_err());
    }
}
