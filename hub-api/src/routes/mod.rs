//! API route definitions

mod artist;
mod health;
mod news;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(news::routes())
        .merge(artist::routes())
        .merge(health::routes())
}
