// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Cats vs Dogs inference node

/// Service display name
pub const SERVICE_NAME: &str = "Cats vs Dogs Classification API";

/// Semantic version number
pub const VERSION: &str = "1.0.0";

/// One-line service description
pub const SERVICE_DESCRIPTION: &str =
    "Binary image classification service for pet adoption platform";

/// Static service descriptor for the root endpoint
pub fn service_descriptor() -> serde_json::Value {
    serde_json::json!({
        "service": SERVICE_NAME,
        "version": VERSION,
        "endpoints": {
            "health": "/health",
            "predict": "/predict",
            "metrics": "/metrics",
        },
        "description": SERVICE_DESCRIPTION,
    })
}
