// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction response types

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::classifier::{Label, Prediction};
use crate::monitoring::round_to;

/// Response from a successful prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted class
    pub label: Label,
    /// Probability mass on the predicted class, rounded to 4 dp
    pub confidence: f64,
    /// Wall-clock latency of decode + inference, rounded to 2 dp
    pub latency_ms: f64,
    /// ISO-8601 timestamp of the prediction
    pub timestamp: String,
}

impl PredictionResponse {
    /// Build the response for one prediction, applying the rounding rules
    pub fn new(prediction: Prediction, latency_ms: f64) -> Self {
        Self {
            label: prediction.label,
            confidence: round_to(prediction.confidence as f64, 4),
            latency_ms: round_to(latency_ms, 2),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
