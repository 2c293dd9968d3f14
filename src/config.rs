// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration from environment variables

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default model artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/cats_dogs_model.onnx";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration of the inference service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to the serialized model artifact (`MODEL_PATH`)
    pub model_path: PathBuf,
    /// Bind address (`API_HOST`)
    pub host: String,
    /// Bind port (`API_PORT`)
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let model_path = env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
        let host = env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            model_path: PathBuf::from(model_path),
            host,
            port,
        }
    }

    /// Resolve the bind address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context("Invalid API_HOST/API_PORT combination")
    }
}
