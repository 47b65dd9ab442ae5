//! Side-panel endpoints derived from the news list

use axum::{extract::State, response::Json, routing::get, Router};

use hub_core::{ArtistBio, Quote};

use crate::AppState;

/// GET /api/artist-of-the-day
async fn get_artist_of_the_day(State(state): State<AppState>) -> Json<ArtistBio> {
    Json(state.news_service.artist_of_the_day().await)
}

/// GET /api/quote
async fn get_quote(State(state): State<AppState>) -> Json<Quote> {
    Json(state.news_service.quote_of_the_moment().await)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/artist-of-the-day", get(get_artist_of_the_day))
        .route("/quote", get(get_quote))
}
