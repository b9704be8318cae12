use std::path::PathBuf;

use foretick_core::Ticker;
use thiserror::Error;

/// Artifact lookup and loading errors.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no model artifact found for ticker '{ticker}'")]
    ModelNotFound { ticker: Ticker },

    #[error("no fitted scaler found for ticker '{ticker}'")]
    ScalerNotFound { ticker: Ticker },

    #[error("artifact at {path} could not be loaded: {detail}")]
    ArtifactCorrupt { path: PathBuf, detail: String },
}

/// Window construction failures; terminal, reported as invalid requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("series has no usable close prices")]
    MissingCloses,

    #[error("insufficient history: have {have} rows, need {need}")]
    InsufficientData { have: usize, need: usize },
}

/// Forward-pass failures. Deterministic given the same artifact and input,
/// so never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("model expects an input window of {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
}
