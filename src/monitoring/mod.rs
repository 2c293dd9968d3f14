// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request metrics and prediction monitoring

pub mod metrics;
pub mod monitor;

pub use metrics::{round_to, MetricsSnapshot, ServiceMetrics};
pub use monitor::{MonitorSummary, PredictionMonitor};
