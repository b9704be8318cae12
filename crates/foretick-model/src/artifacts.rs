//! Artifact location for per-ticker models and scalers.
//!
//! The artifact store is a flat directory. Per ticker it may hold a model
//! in the native format, a model in the legacy format, and a fitted
//! scaler. Resolution probes the native format first because it loads
//! faster; the legacy format is kept readable for artifacts produced by
//! older training runs.

use std::path::{Path, PathBuf};

use foretick_core::Ticker;

use crate::error::ModelError;

/// On-disk serialization format of a model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Compact binary encoding; probed first.
    Native,
    /// JSON encoding produced by older training runs.
    Legacy,
}

/// A located model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact {
    pub ticker: Ticker,
    pub format: ModelFormat,
    pub path: PathBuf,
}

/// A located fitted-scaler file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalerArtifact {
    pub ticker: Ticker,
    pub path: PathBuf,
}

/// The artifact pair a prediction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifacts {
    pub model: ModelArtifact,
    pub scaler: ScalerArtifact,
}

fn native_model_path(dir: &Path, ticker: &Ticker) -> PathBuf {
    dir.join(format!("{ticker}.model.bin"))
}

fn legacy_model_path(dir: &Path, ticker: &Ticker) -> PathBuf {
    dir.join(format!("{ticker}.model.json"))
}

fn scaler_path(dir: &Path, ticker: &Ticker) -> PathBuf {
    dir.join(format!("{ticker}.scaler.json"))
}

/// Locate the model and scaler for a ticker.
///
/// The model probe prefers the native format and falls back to legacy.
/// The scaler is verified independently: a model without its paired scaler
/// cannot be used, since inference must undo the exact normalization the
/// model was trained with.
pub fn resolve_artifacts(dir: &Path, ticker: &Ticker) -> Result<ResolvedArtifacts, ModelError> {
    let model = resolve_model(dir, ticker)?;

    let scaler_file = scaler_path(dir, ticker);
    if !scaler_file.is_file() {
        return Err(ModelError::ScalerNotFound {
            ticker: ticker.clone(),
        });
    }

    Ok(ResolvedArtifacts {
        model,
        scaler: ScalerArtifact {
            ticker: ticker.clone(),
            path: scaler_file,
        },
    })
}

fn resolve_model(dir: &Path, ticker: &Ticker) -> Result<ModelArtifact, ModelError> {
    let native = native_model_path(dir, ticker);
    if native.is_file() {
        return Ok(ModelArtifact {
            ticker: ticker.clone(),
            format: ModelFormat::Native,
            path: native,
        });
    }

    let legacy = legacy_model_path(dir, ticker);
    if legacy.is_file() {
        return Ok(ModelArtifact {
            ticker: ticker.clone(),
            format: ModelFormat::Legacy,
            path: legacy,
        });
    }

    Err(ModelError::ModelNotFound {
        ticker: ticker.clone(),
    })
}
