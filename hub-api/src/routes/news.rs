//! News endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hub_core::{HubError, NewsItem};

use crate::AppState;

/// Query parameters for listing news
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Only items with this category label (e.g. "Jazz", "News")
    pub category: Option<String>,
}

/// Query parameters for searching news
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewsResponse {
    items: Vec<NewsItem>,
    total: usize,
}

impl NewsResponse {
    fn new(items: Vec<NewsItem>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(get_news))
        .route("/news/search", get(search_news))
        .route("/news/{id}", get(get_news_item))
}

/// GET /api/news - The aggregated list, served from cache when fresh
async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQuery>,
) -> Json<NewsResponse> {
    let mut items = state.news_service.latest_news().await;

    if let Some(category) = params.category.as_deref() {
        match category.parse::<hub_core::Category>() {
            Ok(category) => items.retain(|item| item.category == category),
            Err(e) => {
                debug!("Ignoring category filter: {}", e);
            }
        }
    }
    if let Some(limit) = params.limit {
        items.truncate(limit);
    }

    Json(NewsResponse::new(items))
}

/// GET /api/news/search?q= - Case-insensitive title search
async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<NewsResponse> {
    Json(NewsResponse::new(state.news_service.search(&params.q).await))
}

/// GET /api/news/{id} - One item of the current list, for the detail view
async fn get_news_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.news_service.news_item(&id).await {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => {
            let err = HubError::not_found(format!("news item {}", id));
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
