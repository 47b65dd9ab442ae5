//! Core types for the music hub
//!
//! This crate defines the shared data structures used across the hub,
//! including the normalized news item, feed sources, genre categories
//! and the small derived entities shown next to the news list.

pub mod artist;
pub mod category;
pub mod error;
pub mod news;

pub use artist::{ArtistBio, Quote, SourceLink};
pub use category::Category;
pub use error::HubError;
pub use news::{FeedSource, NewsItem};
