//! Derived entities shown alongside the news list

use serde::{Deserialize, Serialize};

/// A link back to where a derived entity came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub uri: String,
    pub title: String,
}

/// Profile card for the "artist of the day" panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistBio {
    pub name: String,
    /// Up to four sentences
    pub biography: Vec<String>,
    pub portrait_url: String,
    #[serde(default)]
    pub youtube_id: String,
    pub genre: String,
    pub location: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceLink>,
}

impl ArtistBio {
    /// Card shown when no news is available to derive one from
    pub fn fallback() -> Self {
        Self {
            name: "SONIC ARCHITECT".to_string(),
            biography: vec!["A master of atmospheric frequencies.".to_string()],
            portrait_url: "https://images.unsplash.com/photo-1598488035139-bdbb2231ce04?auto=format&fit=crop&q=90&w=2000".to_string(),
            youtube_id: String::new(),
            genre: "Ambient".to_string(),
            location: "Global".to_string(),
            achievements: vec!["Circle Certified".to_string()],
            sources: Vec::new(),
        }
    }
}

/// A short line surfaced in the rotating quote banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn fallback() -> Self {
        Self {
            text: "MUSIC IS THE DIVINE WAY TO TELL BEAUTIFUL, POETIC THINGS TO THE HEART."
                .to_string(),
            author: "Pablo Casals".to_string(),
        }
    }
}
