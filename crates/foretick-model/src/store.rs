//! Per-request model loading seam.
//!
//! Artifacts are looked up and loaded fresh on every cache miss; there is
//! deliberately no in-memory artifact cache here. The trait exists so the
//! serving layer can be driven by test doubles that count or fake
//! inference.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use foretick_core::Ticker;

use crate::artifacts::resolve_artifacts;
use crate::error::ModelError;
use crate::network::{DenseNetwork, Forecaster};
use crate::scaler::MinMaxScaler;

/// A ticker's loaded model and its paired fitted scaler.
pub struct TickerModel {
    pub forecaster: Arc<dyn Forecaster>,
    pub scaler: MinMaxScaler,
}

impl std::fmt::Debug for TickerModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerModel")
            .field("forecaster", &"<dyn Forecaster>")
            .field("scaler", &self.scaler)
            .finish()
    }
}

/// Loads the model and scaler for a ticker.
pub trait ModelStore: Send + Sync {
    fn load<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<TickerModel, ModelError>> + Send + 'a>>;
}

/// Filesystem-backed store over a flat artifact directory.
#[derive(Debug, Clone)]
pub struct FsModelStore {
    artifact_dir: PathBuf,
}

impl FsModelStore {
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
        }
    }
}

impl ModelStore for FsModelStore {
    fn load<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<TickerModel, ModelError>> + Send + 'a>> {
        Box::pin(async move {
            let resolved = resolve_artifacts(&self.artifact_dir, ticker)?;
            let network = DenseNetwork::load(&resolved.model)?;
            let scaler = MinMaxScaler::load(&resolved.scaler.path)?;

            Ok(TickerModel {
                forecaster: Arc::new(network),
                scaler,
            })
        })
    }
}
