//! API route configuration

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metrics::METRICS;
use crate::prioritizer::{handlers as prioritizer_handlers, PrioritizerState};

/// Build the service router
pub fn build_router(state: PrioritizerState, server: &ServerConfig) -> Router {
    Router::new()
        .route(
            "/api/v1/tasks/prioritize",
            post(prioritizer_handlers::prioritize_tasks),
        )
        .route("/health", get(health))
        .route("/metrics", get(export_metrics))
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Liveness probe
///
/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Prometheus text exposition
///
/// GET /metrics
async fn export_metrics() -> String {
    METRICS.export_prometheus()
}
