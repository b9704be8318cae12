//! axum router and handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use foretick_core::Ticker;

use crate::error::ApiError;
use crate::predict::{PredictRequest, PredictionResult};
use crate::quotes::QuoteChange;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
        .route("/api/predict", post(predict))
        .route("/api/quotes", post(quotes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    state.predictions.predict(request).await.map(Json)
}

#[derive(Debug, Clone, Deserialize)]
struct QuotesRequest {
    #[serde(default)]
    tickers: Vec<String>,
}

/// Never fails the batch: a malformed body or unparseable symbols just
/// shrink the result, down to an empty array.
async fn quotes(
    State(state): State<AppState>,
    payload: Result<Json<QuotesRequest>, JsonRejection>,
) -> Json<Vec<QuoteChange>> {
    let tickers = payload
        .map(|Json(body)| body.tickers)
        .unwrap_or_default();

    let parsed: Vec<Ticker> = tickers
        .iter()
        .filter_map(|raw| Ticker::parse(raw).ok())
        .collect();

    Json(state.quotes.quotes(&parsed).await)
}
