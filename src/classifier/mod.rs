// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Binary cat/dog classifier
//!
//! Wraps an ONNX Runtime session around the trained model artifact and
//! turns its sigmoid output into a labelled prediction.

pub mod decision;
pub mod onnx_model;

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

pub use decision::{classify, Label, Prediction};
pub use onnx_model::{OnnxClassifier, IMAGE_SIZE};

/// Attempt to load the classifier from disk at startup.
///
/// Load failure is non-fatal: the service starts in degraded mode and keeps
/// serving health checks until restarted with a valid artifact.
pub async fn load_classifier(model_path: &Path) -> Option<Arc<OnnxClassifier>> {
    match OnnxClassifier::load(model_path).await {
        Ok(classifier) => {
            info!("Model loaded successfully from {}", model_path.display());
            Some(Arc::new(classifier))
        }
        Err(e) => {
            error!("Error loading model: {:#}", e);
            None
        }
    }
}
