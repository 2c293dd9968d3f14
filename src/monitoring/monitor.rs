// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction event monitor
//!
//! Tracks per-class prediction counts, success/failure counts, and latency,
//! and emits one structured log event per prediction or error. This is the
//! operational view of the service; the health endpoint counters live in
//! [`super::metrics::ServiceMetrics`].

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

use super::metrics::round_to;
use crate::classifier::Label;

#[derive(Debug, Default)]
struct MonitorState {
    total_requests: u64,
    successful_predictions: u64,
    failed_predictions: u64,
    total_latency_ms: f64,
    predictions_by_class: HashMap<Label, u64>,
}

/// Summary statistics over everything observed since startup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonitorSummary {
    pub total_requests: u64,
    pub successful_predictions: u64,
    pub failed_predictions: u64,
    /// Percentage of requests that produced a prediction, rounded to 2 dp
    pub success_rate: f64,
    /// Average latency of successful predictions, rounded to 2 dp
    pub average_latency_ms: f64,
    pub cats: u64,
    pub dogs: u64,
}

/// Collects prediction events and computes summary statistics.
///
/// Counts both successful and failed predictions; only successful ones
/// contribute latency and a class count.
#[derive(Debug, Default)]
pub struct PredictionMonitor {
    state: Mutex<MonitorState>,
}

impl PredictionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful prediction and log it as a structured event
    pub fn log_prediction(
        &self,
        request_id: &str,
        image_name: Option<&str>,
        label: Label,
        confidence: f64,
        latency_ms: f64,
    ) {
        {
            let mut state = self.state.lock().unwrap();
            state.total_requests += 1;
            state.successful_predictions += 1;
            state.total_latency_ms += latency_ms;
            *state.predictions_by_class.entry(label).or_insert(0) += 1;
        }

        info!(
            request_id,
            image = image_name.unwrap_or("<unnamed>"),
            predicted_class = %label,
            confidence,
            latency_ms,
            "prediction"
        );
    }

    /// Record a failed prediction and log the reason
    pub fn log_failure(&self, request_id: &str, reason: &str) {
        {
            let mut state = self.state.lock().unwrap();
            state.total_requests += 1;
            state.failed_predictions += 1;
        }

        warn!(request_id, reason, "prediction failed");
    }

    /// Compute summary statistics over all observed events
    pub fn summary(&self) -> MonitorSummary {
        let state = self.state.lock().unwrap();

        let success_rate = if state.total_requests > 0 {
            state.successful_predictions as f64 / state.total_requests as f64 * 100.0
        } else {
            0.0
        };
        let average_latency_ms = if state.successful_predictions > 0 {
            state.total_latency_ms / state.successful_predictions as f64
        } else {
            0.0
        };

        MonitorSummary {
            total_requests: state.total_requests,
            successful_predictions: state.successful_predictions,
            failed_predictions: state.failed_predictions,
            success_rate: round_to(success_rate, 2),
            average_latency_ms: round_to(average_latency_ms, 2),
            cats: state
                .predictions_by_class
                .get(&Label::Cat)
                .copied()
                .unwrap_or(0),
            dogs: state
                .predictions_by_class
                .get(&Label::Dog)
                .copied()
                .unwrap_or(0),
        }
    }
}
