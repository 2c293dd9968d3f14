// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint handler

use axum::extract::{Multipart, State};
use axum::Json;
use ndarray::Array4;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::response::PredictionResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::classifier::{classify, IMAGE_SIZE};
use crate::vision::{decode_image_bytes, to_model_input};

/// Validate the upload and turn it into a classifier input batch.
///
/// Runs the checks that follow the model-presence check: the declared
/// content type must be `image/*` and the payload must decode. Both
/// failures map to 400 with detail.
pub fn prepare_input(content_type: &str, bytes: &[u8]) -> Result<Array4<f32>, ApiError> {
    if !content_type.starts_with("image/") {
        return Err(ApiError::invalid_request("File must be an image"));
    }

    let (image, _info) = decode_image_bytes(bytes)
        .map_err(|e| ApiError::invalid_request(format!("Error preprocessing image: {}", e)))?;

    Ok(to_model_input(&image, IMAGE_SIZE))
}

/// POST /predict - Classify an uploaded image as cat or dog
///
/// Accepts a multipart upload with a single `file` field and returns the
/// predicted label with its confidence and latency.
///
/// # Errors
/// - 503 Service Unavailable: model not loaded (degraded mode)
/// - 400 Bad Request: missing `file` field, non-image content type, or
///   undecodable payload
/// - 500 Internal Server Error: inference failure (detail logged server-side)
pub async fn predict_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictionResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    // Model must be present before the request is even inspected
    let classifier = state.classifier.as_ref().ok_or_else(|| {
        warn!(%request_id, "Prediction requested but model not loaded");
        state.monitor.log_failure(&request_id, "Model not loaded");
        ApiError::service_unavailable("Model not loaded").with_request_id(&request_id)
    })?;

    // Pull the `file` field out of the multipart stream
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(%request_id, "Malformed multipart body: {}", e);
        ApiError::invalid_request(format!("Malformed multipart body: {}", e))
            .with_request_id(&request_id)
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            warn!(%request_id, "Failed to read upload: {}", e);
            state.monitor.log_failure(&request_id, "Failed to read upload");
            ApiError::invalid_request(format!("Failed to read upload: {}", e))
                .with_request_id(&request_id)
        })?;
        upload = Some((file_name, content_type, bytes));
        break;
    }
    let (file_name, content_type, image_bytes) = upload.ok_or_else(|| {
        state.monitor.log_failure(&request_id, "Missing file field");
        ApiError::invalid_request("A `file` field is required").with_request_id(&request_id)
    })?;

    info!(
        %request_id,
        "Processing image: {}",
        file_name.as_deref().unwrap_or("<unnamed>")
    );

    // Latency covers decode through classification
    let started = Instant::now();

    let input = prepare_input(&content_type, &image_bytes).map_err(|e| {
        warn!(%request_id, "Rejected upload: {}", e.message());
        state.monitor.log_failure(&request_id, e.message());
        e.with_request_id(&request_id)
    })?;

    let probability = classifier.predict_probability(input).map_err(|e| {
        // Full detail stays server-side; the caller sees a generic 500
        error!(%request_id, "Unexpected error during prediction: {:#}", e);
        state.monitor.log_failure(&request_id, "Inference failed");
        ApiError::internal(e.to_string()).with_request_id(&request_id)
    })?;

    let prediction = classify(probability);
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    state.metrics.record(latency_ms);
    state.monitor.log_prediction(
        &request_id,
        file_name.as_deref(),
        prediction.label,
        prediction.confidence as f64,
        latency_ms,
    );

    Ok(Json(PredictionResponse::new(prediction, latency_ms)))
}
