// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// src/monitoring/metrics.rs - Aggregate request metrics

use std::sync::Mutex;

/// Round a value to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Point-in-time view of the service counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub requests_served: u64,
    pub total_latency_ms: f64,
    /// `total_latency_ms / requests_served`, or 0 before any traffic
    pub average_latency_ms: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct MetricsState {
    requests_served: u64,
    total_latency_ms: f64,
}

/// Process-wide request counters, owned by the app state.
///
/// A single mutex guards both values so a count increment and its latency
/// contribution are never observed apart under concurrent requests.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    state: Mutex<MetricsState>,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful prediction and its latency
    pub fn record(&self, latency_ms: f64) {
        let mut state = self.state.lock().unwrap();
        state.requests_served += 1;
        state.total_latency_ms += latency_ms;
    }

    /// Read the counters without mutating them
    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.state.lock().unwrap();
        let average_latency_ms = if state.requests_served > 0 {
            state.total_latency_ms / state.requests_served as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            requests_served: state.requests_served,
            total_latency_ms: state.total_latency_ms,
            average_latency_ms,
        }
    }
}
