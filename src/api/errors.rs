// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub request_id: Option<String>,
}

/// Failure class of the inference API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Model not loaded; surfaced as 503
    ServiceUnavailable,
    /// Wrong content type or undecodable payload; surfaced as 400 with detail
    InvalidRequest,
    /// Any other failure; surfaced as 500 without detail leakage
    InternalError,
}

/// Error returned from request handlers.
///
/// Carries the failure class, a message, and the request id of the failed
/// request. `InternalError` keeps its full detail for server-side logging
/// but is surfaced to the caller as a generic message.
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    request_id: Option<String>,
}

impl ApiError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::ServiceUnavailable,
            message: message.into(),
            request_id: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::InvalidRequest,
            message: message.into(),
            request_id: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::InternalError,
            message: message.into(),
            request_id: None,
        }
    }

    /// Attach the id of the request that produced this error
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Message as logged server-side (full detail, all classes)
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message) = match self.kind {
            ApiErrorKind::ServiceUnavailable => ("service_unavailable", self.message.clone()),
            ApiErrorKind::InvalidRequest => ("invalid_request", self.message.clone()),
            // The detail stays in the logs only
            ApiErrorKind::InternalError => ("internal_error", "Internal server error".to_string()),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            request_id: self.request_id.clone(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind {
            ApiErrorKind::ServiceUnavailable => 503,
            ApiErrorKind::InvalidRequest => 400,
            ApiErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiErrorKind::ServiceUnavailable => write!(f, "Service unavailable: {}", self.message),
            ApiErrorKind::InvalidRequest => write!(f, "Invalid request: {}", self.message),
            ApiErrorKind::InternalError => write!(f, "Internal error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = self.to_response();

        (status, axum::response::Json(body)).into_response()
    }
}
