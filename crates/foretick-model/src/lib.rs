//! # Foretick Model
//!
//! Artifact resolution, feature windowing, and inference for the Foretick
//! serving layer.
//!
//! A ticker's trained model and its fitted scaler are persisted as files.
//! At serving time this crate locates them ([`artifacts`]), loads them
//! fresh for every cache miss ([`store`]), turns a raw daily series into a
//! normalized fixed-length input window ([`window`]), and runs the forward
//! pass ([`network`]). The scaler is fitted once at training time and only
//! ever applied here; re-fitting at inference time would change the value
//! domain the model was trained against.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`artifacts`] | Locate model and scaler files per ticker |
//! | [`network`] | Forecaster trait and feed-forward network |
//! | [`scaler`] | Fitted min-max transform |
//! | [`store`] | Per-request model loading seam |
//! | [`window`] | Feature window construction |

pub mod artifacts;
pub mod error;
pub mod network;
pub mod scaler;
pub mod store;
pub mod window;

pub use artifacts::{resolve_artifacts, ModelArtifact, ModelFormat, ResolvedArtifacts, ScalerArtifact};
pub use error::{InferenceError, ModelError, WindowError};
pub use network::{DenseNetwork, Forecaster};
pub use scaler::MinMaxScaler;
pub use store::{FsModelStore, ModelStore, TickerModel};
pub use window::{build_window, FeatureWindow};
