//! Forecaster trait and the feed-forward network loaded from artifacts.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::artifacts::{ModelArtifact, ModelFormat};
use crate::error::{InferenceError, ModelError};

/// A loaded model that can forecast the next scaled value from a scaled
/// input window. Implementations carry no state across calls; identical
/// artifact and input always produce the identical output.
pub trait Forecaster: Send + Sync {
    fn predict(&self, window: &[f64]) -> Result<f64, InferenceError>;
}

/// Hidden-layer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Tanh,
    Linear,
}

/// One dense layer as persisted in an artifact: `weights` is row-major,
/// one row per output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

/// The serialized network: a stack of dense layers ending in a single
/// output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Write the spec in the native (binary) artifact format.
    pub fn save_native(&self, path: &Path) -> Result<(), ModelError> {
        let file = File::create(path).map_err(|e| corrupt(path, e.to_string()))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .map_err(|e| corrupt(path, e.to_string()))
    }

    /// Write the spec in the legacy (JSON) artifact format.
    pub fn save_legacy(&self, path: &Path) -> Result<(), ModelError> {
        let file = File::create(path).map_err(|e| corrupt(path, e.to_string()))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .map_err(|e| corrupt(path, e.to_string()))
    }
}

struct DenseLayer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

/// Feed-forward network compiled from a [`NetworkSpec`].
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
    input_dim: usize,
}

impl DenseNetwork {
    /// Load and validate a network from a located model artifact.
    pub fn load(artifact: &ModelArtifact) -> Result<Self, ModelError> {
        let path = artifact.path.as_path();
        let file = File::open(path).map_err(|e| corrupt(path, e.to_string()))?;
        let reader = BufReader::new(file);

        let spec: NetworkSpec = match artifact.format {
            ModelFormat::Native => {
                bincode::deserialize_from(reader).map_err(|e| corrupt(path, e.to_string()))?
            }
            ModelFormat::Legacy => {
                serde_json::from_reader(reader).map_err(|e| corrupt(path, e.to_string()))?
            }
        };

        Self::compile(spec).map_err(|detail| corrupt(path, detail))
    }

    /// Validate layer shapes and convert the spec into ndarray form.
    pub fn compile(spec: NetworkSpec) -> Result<Self, String> {
        if spec.layers.is_empty() {
            return Err(String::from("network has no layers"));
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut input_dim = None;
        let mut prev_out = None;

        for (index, layer) in spec.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            if rows == 0 {
                return Err(format!("layer {index} has no output units"));
            }
            let cols = layer.weights[0].len();
            if cols == 0 {
                return Err(format!("layer {index} has no input units"));
            }
            if layer.weights.iter().any(|row| row.len() != cols) {
                return Err(format!("layer {index} weight rows are ragged"));
            }
            if layer.bias.len() != rows {
                return Err(format!(
                    "layer {index} bias length {} does not match {rows} output units",
                    layer.bias.len()
                ));
            }
            if let Some(prev) = prev_out {
                if cols != prev {
                    return Err(format!(
                        "layer {index} expects {cols} inputs but previous layer produces {prev}"
                    ));
                }
            } else {
                input_dim = Some(cols);
            }
            prev_out = Some(rows);

            let flat: Vec<f64> = layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((rows, cols), flat)
                .map_err(|e| format!("layer {index} weights: {e}"))?;
            layers.push(DenseLayer {
                weights,
                bias: Array1::from_vec(layer.bias),
                activation: layer.activation,
            });
        }

        if prev_out != Some(1) {
            return Err(format!(
                "final layer must produce a single output, produces {}",
                prev_out.unwrap_or(0)
            ));
        }

        Ok(Self {
            layers,
            input_dim: input_dim.unwrap_or(0),
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }
}

impl Forecaster for DenseNetwork {
    fn predict(&self, window: &[f64]) -> Result<f64, InferenceError> {
        if window.len() != self.input_dim {
            return Err(InferenceError::ShapeMismatch {
                expected: self.input_dim,
                got: window.len(),
            });
        }

        let mut x = Array1::from_vec(window.to_vec());
        for layer in &self.layers {
            let z = layer.weights.dot(&x) + &layer.bias;
            x = match layer.activation {
                Activation::Tanh => z.mapv(f64::tanh),
                Activation::Linear => z,
            };
        }

        Ok(x[0])
    }
}

fn corrupt(path: &Path, detail: String) -> ModelError {
    ModelError::ArtifactCorrupt {
        path: path.to_path_buf(),
        detail,
    }
}
