//! Errors of the classification pipeline.
//!
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The model file is missing, corrupt or not runnable.
    #[error("failed to load model from {path:?}: {reason:#}")]
    Load {
        path: PathBuf,
        reason: anyhow::Error,
    },

    /// The capture could not be decoded into a pixel grid.
    #[error("failed to decode captured image: {0}")]
    Shape(#[from] image::ImageError),

    #[error("inference failed: {0:#}")]
    Inference(anyhow::Error),

    /// The model answered with fewer classes than the interpreter inspects.
    #[error("model returned {0} class probabilities, expected at least 2")]
    Output(usize),
}

impl ClassifierError {
    /// Whether the failure was caused by the submitted capture rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClassifierError::Shape(_))
    }
}
