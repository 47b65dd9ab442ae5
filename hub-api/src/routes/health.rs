//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use hub_services::SourceOutcome;

use crate::AppState;

/// Per-source line of the health report
#[derive(Debug, Serialize)]
struct SourceHealth {
    source: String,
    status: &'static str,
    detail: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    /// Configured sources
    configured: usize,
    /// Outcomes of the last aggregation run; empty before the first run
    sources: Vec<SourceHealth>,
}

/// Health check handler
///
/// Degraded when the last run loaded nothing from any source.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reports = state.news_service.last_reports();

    let healthy = reports.is_empty()
        || reports
            .iter()
            .any(|r| matches!(r.outcome, SourceOutcome::Loaded(_)));

    let sources = reports
        .into_iter()
        .map(|report| SourceHealth {
            status: match report.outcome {
                SourceOutcome::Loaded(_) => "loaded",
                SourceOutcome::Empty => "empty",
                SourceOutcome::Failed(_) => "failed",
            },
            detail: report.outcome.to_string(),
            source: report.source,
        })
        .collect();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        configured: state.news_service.sources().len(),
        sources,
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
