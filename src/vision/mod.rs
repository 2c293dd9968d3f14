// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding and preprocessing for the classifier input pipeline.

pub mod image_utils;

pub use image_utils::{
    decode_image_bytes, detect_format, to_model_input, ImageError, ImageInfo, MAX_IMAGE_SIZE,
};
