//! Music Hub API Server
//!
//! HTTP API server that aggregates music-press feeds into one editorial
//! news list and the side views derived from it.

mod config;
mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use hub_core::HubError;
use hub_news::ProxyFetcher;
use hub_services::{CacheStore, MemoryStore, NewsService, NewsServiceConfig, SqliteStore};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::HubConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<NewsService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hub_api=debug")),
        )
        .init();

    info!("Starting Music Hub API");

    let config = HubConfig::from_env()?;

    let store: Arc<dyn CacheStore> = match &config.cache_db_path {
        Some(path) => {
            info!("Initializing news cache at: {}", path);
            Arc::new(SqliteStore::open(path).map_err(|e| HubError::storage(e.to_string()))?)
        }
        None => {
            info!("CACHE_DB_PATH not set - news cache is in-memory");
            Arc::new(MemoryStore::new())
        }
    };

    let news_config = NewsServiceConfig {
        news_ttl: config.news_ttl,
        sources: config.sources,
        feature_sources: config.feature_sources,
        ..NewsServiceConfig::default()
    };
    let news_service = Arc::new(NewsService::new(
        Arc::new(ProxyFetcher::new()),
        store,
        news_config,
    ));

    // Warm the cache in background on startup
    let service_for_warmup = Arc::clone(&news_service);
    tokio::spawn(async move {
        let items = service_for_warmup.latest_news().await;
        info!("News cache warmed with {} items", items.len());
    });

    let state = AppState { news_service };

    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
