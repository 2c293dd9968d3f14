// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification decision rule

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted class of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Cat,
    Dog,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cat => "cat",
            Label::Dog => "dog",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labelled prediction with the probability mass on the chosen class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Always >= 0.5 after the decision rule
    pub confidence: f32,
}

/// Apply the binary decision rule to the model's sigmoid output.
///
/// The model encodes cat as 0 and dog as 1. A probability strictly above
/// 0.5 classifies as dog with confidence `p`; anything else (including
/// exactly 0.5) classifies as cat with confidence `1 - p`.
pub fn classify(probability: f32) -> Prediction {
    if probability > 0.5 {
        Prediction {
            label: Label::Dog,
            confidence: probability,
        }
    } else {
        Prediction {
            label: Label::Cat,
            confidence: 1.0 - probability,
        }
    }
}
