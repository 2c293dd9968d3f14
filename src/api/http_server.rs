// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::predict::predict_handler;
use crate::classifier::OnnxClassifier;
use crate::config::DEFAULT_MODEL_PATH;
use crate::monitoring::{round_to, PredictionMonitor, ServiceMetrics};
use crate::version;
use crate::vision::MAX_IMAGE_SIZE;

/// Request body cap: the image size limit plus multipart framing overhead.
/// Without this the default 2MB body limit rejects valid images.
const MAX_BODY_SIZE: usize = MAX_IMAGE_SIZE + 16 * 1024;

/// Shared state for all request handlers.
///
/// Constructed once in `main` with an already-load-attempted classifier;
/// there are no framework startup hooks. The classifier is `None` in
/// degraded mode.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Option<Arc<OnnxClassifier>>,
    pub metrics: Arc<ServiceMetrics>,
    pub monitor: Arc<PredictionMonitor>,
    pub model_path: String,
}

impl AppState {
    pub fn new(classifier: Option<Arc<OnnxClassifier>>, model_path: impl Into<String>) -> Self {
        Self {
            classifier,
            metrics: Arc::new(ServiceMetrics::new()),
            monitor: Arc::new(PredictionMonitor::new()),
            model_path: model_path.into(),
        }
    }

    /// State with no classifier loaded (degraded mode), for tests
    pub fn new_for_test() -> Self {
        Self::new(None, DEFAULT_MODEL_PATH)
    }
}

/// Response from the health check endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" when the model is loaded, "degraded" otherwise
    pub status: String,
    pub model_loaded: bool,
    pub model_path: String,
    pub requests_served: u64,
    /// Average prediction latency, rounded to 2 dp; 0 before any traffic
    pub average_latency_ms: f64,
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the service router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Service descriptor
        .route("/", get(root_handler))
        // Health check
        .route("/health", get(health_handler))
        // Prediction endpoint
        .route("/predict", post(predict_handler))
        // Metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Static service descriptor
pub async fn root_handler() -> impl IntoResponse {
    axum::response::Json(version::service_descriptor())
}

/// GET /health - Service status and aggregate request metrics
///
/// Reads the counters without mutating them.
pub async fn health_handler(State(state): State<AppState>) -> axum::response::Json<HealthResponse> {
    let snapshot = state.metrics.snapshot();

    axum::response::Json(HealthResponse {
        status: if state.classifier.is_some() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        model_loaded: state.classifier.is_some(),
        model_path: state.model_path.clone(),
        requests_served: snapshot.requests_served,
        average_latency_ms: round_to(snapshot.average_latency_ms, 2),
    })
}

/// GET /metrics - Prometheus-style text exposition of the service counters
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    let summary = state.monitor.summary();

    let metrics = format!(
        "# HELP predict_requests_total Total prediction requests received\n\
         # TYPE predict_requests_total counter\n\
         predict_requests_total {}\n\
         # HELP predict_success_total Successful predictions\n\
         # TYPE predict_success_total counter\n\
         predict_success_total {}\n\
         # HELP predict_failure_total Failed predictions\n\
         # TYPE predict_failure_total counter\n\
         predict_failure_total {}\n\
         # HELP predict_latency_ms_sum Cumulative prediction latency in milliseconds\n\
         # TYPE predict_latency_ms_sum counter\n\
         predict_latency_ms_sum {}\n\
         # HELP predictions_total Predictions by class\n\
         # TYPE predictions_total counter\n\
         predictions_total{{class=\"cat\"}} {}\n\
         predictions_total{{class=\"dog\"}} {}\n",
        summary.total_requests,
        summary.successful_predictions,
        summary.failed_predictions,
        snapshot.total_latency_ms,
        summary.cats,
        summary.dogs,
    );

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(axum::body::Body::from(metrics))
        .unwrap()
}
