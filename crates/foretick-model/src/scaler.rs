//! Fitted min-max scaler.
//!
//! The scaler maps raw prices into `[0, 1]` using bounds fitted once at
//! training time. Serving only ever applies or inverts it; the bounds are
//! never re-fit here.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Invertible min-max transform with training-time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: f64,
    data_max: f64,
}

impl MinMaxScaler {
    /// Build from fitted bounds. `max` must be strictly greater than `min`
    /// and both must be finite, otherwise the transform is not invertible.
    pub fn from_bounds(data_min: f64, data_max: f64) -> Option<Self> {
        if !data_min.is_finite() || !data_max.is_finite() || data_max <= data_min {
            return None;
        }
        Some(Self { data_min, data_max })
    }

    /// The identity transform; bounds `[0, 1]`.
    pub fn identity() -> Self {
        Self {
            data_min: 0.0,
            data_max: 1.0,
        }
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.data_min) / (self.data_max - self.data_min)
    }

    pub fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self.transform(*v)).collect()
    }

    pub fn inverse(&self, scaled: f64) -> f64 {
        scaled * (self.data_max - self.data_min) + self.data_min
    }

    /// Load a fitted scaler from its JSON artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|e| ModelError::ArtifactCorrupt {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let scaler: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelError::ArtifactCorrupt {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        if Self::from_bounds(scaler.data_min, scaler.data_max).is_none() {
            return Err(ModelError::ArtifactCorrupt {
                path: path.to_path_buf(),
                detail: format!(
                    "scaler bounds are not invertible: min={}, max={}",
                    scaler.data_min, scaler.data_max
                ),
            });
        }

        Ok(scaler)
    }
}
