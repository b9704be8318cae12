//! Prediction orchestration.
//!
//! Request flow: cache check → on hit, respond; on miss → resolve and load
//! artifacts → fetch the raw series → validate and window → infer →
//! write-through cache → respond. Artifact failures are terminal 404s and
//! validation failures terminal 400s; cache and provider degradation are
//! absorbed here and never surface.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use foretick_core::{
    prediction_key, ClosePoint, DailySeries, PredictionCache, SeriesProvider, Ticker, TradingDay,
    ValidationError,
};
use foretick_model::{build_window, ModelStore};

use crate::error::ApiError;

const PREDICTION_TTL: Duration = Duration::from_secs(300);

/// Calendar days fetched per window point; daily bars only exist on
/// trading days, so the range overshoots to guarantee enough rows.
const FETCH_DAYS_PER_WINDOW: u32 = 3;

fn default_window() -> usize {
    60
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub ticker: String,
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A served prediction: the raw close history backing the input window and
/// the forecast price. Immutable once built; cache hits deserialize into
/// the identical structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub ticker: Ticker,
    pub history: Vec<ClosePoint>,
    pub prediction: f64,
}

/// Coordinates the cache, artifact store, and provider for one prediction
/// request at a time. Shared process-wide; holds no per-request state.
pub struct PredictionService {
    models: Arc<dyn ModelStore>,
    provider: Arc<dyn SeriesProvider>,
    cache: Arc<dyn PredictionCache>,
}

impl PredictionService {
    pub fn new(
        models: Arc<dyn ModelStore>,
        provider: Arc<dyn SeriesProvider>,
        cache: Arc<dyn PredictionCache>,
    ) -> Self {
        Self {
            models,
            provider,
            cache,
        }
    }

    pub async fn predict(&self, request: PredictRequest) -> Result<PredictionResult, ApiError> {
        let ticker = Ticker::parse(&request.ticker)?.renamed();

        if request.window == 0 {
            return Err(ValidationError::ZeroWindow.into());
        }

        let end_day = match &request.end_date {
            Some(raw) => TradingDay::parse(raw)?,
            None => TradingDay::today_utc(),
        };

        let key = prediction_key(&ticker, request.window, end_day);
        if let Some(payload) = self.cache.get(&key).await {
            match serde_json::from_str::<PredictionResult>(&payload) {
                Ok(result) => {
                    tracing::debug!(%key, "prediction cache hit");
                    return Ok(result);
                }
                Err(error) => {
                    tracing::warn!(%key, %error, "discarding undecodable cache entry");
                }
            }
        }

        // Artifacts are loaded fresh per miss; concurrent misses on the
        // same key recompute independently.
        let model = self.models.load(&ticker).await?;

        let span_days = u32::try_from(request.window)
            .ok()
            .and_then(|w| w.checked_mul(FETCH_DAYS_PER_WINDOW))
            .ok_or_else(|| ApiError::BadRequest(String::from("window size out of range")))?;
        let start_day = end_day.days_before(span_days)?;

        let series = match self.provider.history(&ticker, start_day, end_day).await {
            Ok(series) => series,
            Err(error) => {
                tracing::warn!(%ticker, %error, "series fetch failed; validating empty history");
                DailySeries::empty(ticker.clone())
            }
        };

        let window = build_window(&series, request.window, &model.scaler)?;
        let scaled = model.forecaster.predict(&window.inputs)?;
        let prediction = model.scaler.inverse(scaled);

        let result = PredictionResult {
            ticker,
            history: window.history,
            prediction,
        };

        match serde_json::to_string(&result) {
            Ok(payload) => self.cache.set(&key, payload, PREDICTION_TTL).await,
            Err(error) => tracing::warn!(%error, "prediction not cacheable"),
        }

        Ok(result)
    }
}
