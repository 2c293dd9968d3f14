// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health endpoint tests for GET /health
//!
//! These tests verify that the health check:
//! - Reports degraded status while no model is loaded
//! - Reports zeroed counters before any traffic
//! - Computes and rounds the average latency correctly
//! - Never mutates the counters it reads

use axum::extract::State;
use cats_dogs_node::api::http_server::{health_handler, metrics_handler, root_handler, AppState};
use axum::response::IntoResponse;

#[cfg(test)]
mod health_tests {
    use super::*;

    /// Test 1: Degraded status and model_loaded=false without a model
    #[tokio::test]
    async fn test_health_degraded_without_model() {
        let state = AppState::new_for_test();

        let response = health_handler(State(state)).await.0;

        assert_eq!(response.status, "degraded");
        assert!(!response.model_loaded);
    }

    /// Test 2: Counters are zero before any prediction
    #[tokio::test]
    async fn test_health_zero_counters_before_traffic() {
        let state = AppState::new_for_test();

        let response = health_handler(State(state)).await.0;

        assert_eq!(response.requests_served, 0);
        assert_eq!(response.average_latency_ms, 0.0);
    }

    /// Test 3: After N recorded latencies, average = round(sum/N, 2)
    #[tokio::test]
    async fn test_health_average_latency() {
        let state = AppState::new_for_test();
        for latency in [12.5, 40.0, 33.3, 7.1] {
            state.metrics.record(latency);
        }

        let response = health_handler(State(state)).await.0;

        assert_eq!(response.requests_served, 4);
        // round((12.5 + 40.0 + 33.3 + 7.1) / 4, 2)
        assert_eq!(response.average_latency_ms, 23.23);
    }

    /// Test 4: Reading health twice returns identical counters
    #[tokio::test]
    async fn test_health_is_read_only() {
        let state = AppState::new_for_test();
        state.metrics.record(10.0);

        let first = health_handler(State(state.clone())).await.0;
        let second = health_handler(State(state)).await.0;

        assert_eq!(first.requests_served, second.requests_served);
        assert_eq!(first.average_latency_ms, second.average_latency_ms);
    }

    /// Test 5: Health response reports the configured model path
    #[tokio::test]
    async fn test_health_reports_model_path() {
        let state = AppState::new(None, "models/custom.onnx");

        let response = health_handler(State(state)).await.0;

        assert_eq!(response.model_path, "models/custom.onnx");
    }

    /// Test 6: Health response serializes with the documented field names
    #[tokio::test]
    async fn test_health_response_shape() {
        let state = AppState::new_for_test();

        let response = health_handler(State(state)).await.0;
        let json = serde_json::to_value(&response).unwrap();

        for field in [
            "status",
            "model_loaded",
            "model_path",
            "requests_served",
            "average_latency_ms",
        ] {
            assert!(json.get(field).is_some(), "missing field: {}", field);
        }
    }
}

#[cfg(test)]
mod descriptor_and_metrics_tests {
    use super::*;

    /// Test 7: Root descriptor carries service name, version and endpoints
    #[tokio::test]
    async fn test_root_descriptor() {
        let response = root_handler().await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["service"], "Cats vs Dogs Classification API");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["endpoints"]["health"], "/health");
        assert_eq!(json["endpoints"]["predict"], "/predict");
    }

    /// Test 8: Metrics exposition includes every counter family
    #[tokio::test]
    async fn test_metrics_exposition() {
        let state = AppState::new_for_test();
        state.metrics.record(10.0);
        state.monitor.log_prediction(
            "r1",
            Some("cat.jpg"),
            cats_dogs_node::Label::Cat,
            0.9,
            10.0,
        );

        let response = metrics_handler(State(state)).await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(text.contains("predict_requests_total 1"));
        assert!(text.contains("predict_success_total 1"));
        assert!(text.contains("predictions_total{class=\"cat\"} 1"));
        assert!(text.contains("predictions_total{class=\"dog\"} 0"));
        assert!(text.contains("predict_latency_ms_sum 10"));
    }
}
