// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use cats_dogs_node::{
    api::{start_server, AppState},
    classifier::load_classifier,
    config::ServiceConfig,
    version,
};
use std::env;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {} v{}", version::SERVICE_NAME, version::VERSION);

    let config = ServiceConfig::from_env();

    // Load failure is non-fatal: the service starts degraded and keeps
    // serving health checks until restarted with a valid artifact.
    let classifier = load_classifier(&config.model_path).await;
    if classifier.is_none() {
        warn!("Model not loaded - service running in degraded mode");
    } else {
        info!("Inference service ready");
    }

    let state = AppState::new(classifier, config.model_path.display().to_string());
    let addr = config.socket_addr()?;

    start_server(state, addr).await
}
