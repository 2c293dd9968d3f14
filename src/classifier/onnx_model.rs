// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Classifier Session Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running the
//! trained cats-vs-dogs CNN exported by the training pipeline.
//!
//! Features:
//! - ONNX model loading from disk
//! - Output shape validation at load time (single sigmoid scalar)
//! - Single-image batch inference returning the raw probability

use anyhow::{Context, Result};
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Square input dimension expected by the model
pub const IMAGE_SIZE: u32 = 224;

/// ONNX-based binary image classifier (cats vs dogs)
///
/// Wraps ONNX Runtime to produce a single sigmoid probability per image:
/// 0 maps to cat, 1 maps to dog.
///
/// # Model Details
/// - Input: `[1, 224, 224, 3]` f32, pixel intensities in [0, 1]
/// - Output: `[1, 1]` f32 sigmoid probability
/// - Provider: CPU (ONNX Runtime)
///
/// # Thread Safety
/// The session is wrapped in `Arc<Mutex>` for thread-safe shared access;
/// the handle itself is read-only after load.
#[derive(Clone)]
pub struct OnnxClassifier {
    /// ONNX Runtime session (wrapped in Arc<Mutex> for thread-safe shared access)
    session: Arc<Mutex<Session>>,

    /// Name of the model's single input tensor
    input_name: String,

    /// Path the artifact was loaded from
    model_path: PathBuf,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_name", &self.input_name)
            .field("model_path", &self.model_path)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Loads the classifier from an ONNX artifact on disk
    ///
    /// # Arguments
    /// - `model_path`: Path to the ONNX model file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    /// - The model does not output a single sigmoid scalar
    ///
    /// # Example
    /// ```ignore
    /// let classifier = OnnxClassifier::load("models/cats_dogs_model.onnx").await?;
    /// ```
    pub async fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Model file not found at {}", model_path.display());
        }

        info!("Loading model from {}", model_path.display());

        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .context("Model declares no inputs")?;

        // Validate the output shape by running a zero batch through the
        // session. A wrong artifact is rejected here rather than on the
        // first request. Wrap in a block so outputs drop before moving
        // the session.
        {
            let zeros = Array4::<f32>::zeros((
                1,
                IMAGE_SIZE as usize,
                IMAGE_SIZE as usize,
                3,
            ));
            let outputs = session.run(ort::inputs![
                input_name.as_str() => Value::from_array(zeros)?
            ])?;

            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            if output_tensor.len() != 1 {
                anyhow::bail!(
                    "Model outputs unexpected dimensions: {:?} (expected a single sigmoid scalar)",
                    output_tensor.shape()
                );
            }
        } // outputs dropped here

        info!("ONNX classifier session initialized");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            model_path: model_path.to_path_buf(),
        })
    }

    /// Runs inference on a single-image batch
    ///
    /// # Arguments
    /// - `input`: `[1, 224, 224, 3]` batch with intensities in [0, 1]
    ///
    /// # Returns
    /// - `Result<f32>`: The raw sigmoid probability (dog mass)
    pub fn predict_probability(&self, input: Array4<f32>) -> Result<f32> {
        // Lock session for thread-safe access; inference is CPU-bound and
        // serialized across concurrent requests.
        let mut session_guard = self.session.lock().unwrap();
        let outputs = session_guard.run(ort::inputs![
            self.input_name.as_str() => Value::from_array(input)?
        ])?;

        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let probability = output_array
            .iter()
            .next()
            .copied()
            .context("Model returned an empty output")?;

        Ok(probability)
    }

    /// Returns the path the artifact was loaded from
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}
