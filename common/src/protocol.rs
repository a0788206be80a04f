//! Protocol definition for the classify endpoint.
//!
use std::fmt;

use serde::{Deserialize, Serialize};

/// Probability a class has to exceed to be reported.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Classes the paired model was trained on, in output order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Label {
    Left,
    Up,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Left => write!(f, "Left"),
            Label::Up => write!(f, "Up"),
        }
    }
}

/// Interpretation of one prediction.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Confident { label: Label, score: f32 },
    NoConfidentClass,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Confident { label, score } => write!(f, "{label} (score {score:.3})"),
            Outcome::NoConfidentClass => write!(
                f,
                "no class exceeded the {CONFIDENCE_THRESHOLD} threshold"
            ),
        }
    }
}

/// Answer of the server to a single capture.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassifyResponse {
    /// The request carried no image, nothing was run.
    NoCapture,
    Classified {
        probabilities: Vec<f32>,
        outcome: Outcome,
        summary: String,
    },
    Failed {
        error: String,
    },
}

impl ClassifyResponse {
    pub fn classified(probabilities: Vec<f32>, outcome: Outcome) -> Self {
        let summary = outcome.to_string();
        Self::Classified {
            probabilities,
            outcome,
            summary,
        }
    }

    pub fn failed(error: impl fmt::Display) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }
}

impl fmt::Display for ClassifyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyResponse::NoCapture => write!(f, "no image captured yet"),
            ClassifyResponse::Classified {
                probabilities,
                summary,
                ..
            } => write!(f, "probabilities {probabilities:?}: {summary}"),
            ClassifyResponse::Failed { error } => write!(f, "classification failed: {error}"),
        }
    }
}
