// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod monitoring;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{ApiError, ApiErrorKind, AppState, ErrorResponse, HealthResponse, PredictionResponse};
pub use classifier::{classify, load_classifier, Label, OnnxClassifier, Prediction};
pub use config::ServiceConfig;
pub use monitoring::{MonitorSummary, PredictionMonitor, ServiceMetrics};
