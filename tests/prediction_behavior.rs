//! Behavioral tests for the prediction pipeline.
//!
//! These exercise the full orchestration (cache check, artifact loading,
//! series fetch, windowing, inference, write-through) against programmable
//! collaborators.

use std::sync::Arc;

use foretick_model::network::{Activation, LayerSpec, NetworkSpec};
use foretick_model::FsModelStore;
use foretick_serve::{ApiError, PredictRequest, PredictionService};
use foretick_tests::{daily_series, MemoryCache, StaticModelStore, StubProvider};

fn request(ticker: &str, window: usize, end_date: &str) -> PredictRequest {
    PredictRequest {
        ticker: ticker.to_owned(),
        window,
        end_date: Some(end_date.to_owned()),
    }
}

fn mean_service(provider: StubProvider) -> (PredictionService, Arc<StaticModelStore>) {
    let store = Arc::new(StaticModelStore::new());
    let service = PredictionService::new(
        store.clone(),
        Arc::new(provider),
        Arc::new(MemoryCache::new()),
    );
    (service, store)
}

// =============================================================================
// End-to-end pipeline
// =============================================================================

#[tokio::test]
async fn prediction_is_mean_of_last_window_closes() {
    // 20 daily rows with closes 100..=119; the last 5 average to 117.
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("AAPL", daily_series("AAPL", "2023-12-22", &closes));
    let (service, _store) = mean_service(provider);

    let result = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("prediction should succeed");

    assert_eq!(result.ticker.as_str(), "AAPL");
    assert_eq!(result.history.len(), 5);
    assert_eq!(result.history[0].close, 115.0);
    assert_eq!(result.history[4].close, 119.0);
    assert!((result.prediction - 117.0).abs() < 1e-9);
}

#[tokio::test]
async fn history_dates_match_the_stub_rows() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("AAPL", daily_series("AAPL", "2023-12-22", &closes));
    let (service, _store) = mean_service(provider);

    let result = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("prediction should succeed");

    // Rows run 2023-12-22 .. 2024-01-10; the window covers the last five.
    assert_eq!(result.history[0].date.to_string(), "2024-01-06");
    assert_eq!(result.history[4].date.to_string(), "2024-01-10");
}

#[tokio::test]
async fn filesystem_artifacts_drive_the_same_pipeline() {
    // Real artifacts on disk: a mean-weights linear model and an identity
    // scaler, loaded through the production store.
    let dir = tempfile::tempdir().expect("tempdir");
    let spec = NetworkSpec {
        layers: vec![LayerSpec {
            weights: vec![vec![0.2; 5]],
            bias: vec![0.0],
            activation: Activation::Linear,
        }],
    };
    spec.save_native(&dir.path().join("AAPL.model.bin"))
        .expect("save model");
    std::fs::write(
        dir.path().join("AAPL.scaler.json"),
        r#"{"data_min":0.0,"data_max":1.0}"#,
    )
    .expect("write scaler");

    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("AAPL", daily_series("AAPL", "2023-12-22", &closes));
    let service = PredictionService::new(
        Arc::new(FsModelStore::new(dir.path())),
        Arc::new(provider),
        Arc::new(MemoryCache::new()),
    );

    let result = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("prediction should succeed");

    assert_eq!(result.history.len(), 5);
    assert!((result.prediction - 117.0).abs() < 1e-9);
}

// =============================================================================
// Caching behavior
// =============================================================================

#[tokio::test]
async fn repeated_request_within_ttl_skips_inference() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("AAPL", daily_series("AAPL", "2023-12-22", &closes));
    let (service, store) = mean_service(provider);

    let first = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("first prediction succeeds");
    let second = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("second prediction succeeds");

    assert_eq!(store.forecaster.call_count(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn cache_hit_is_structurally_identical_to_fresh_computation() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("AAPL", daily_series("AAPL", "2023-12-22", &closes));
    let (service, _store) = mean_service(provider);

    let fresh = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("fresh prediction succeeds");
    let cached = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("cached prediction succeeds");

    let fresh_json = serde_json::to_string(&fresh).expect("serializable");
    let cached_json = serde_json::to_string(&cached).expect("serializable");
    assert_eq!(fresh_json, cached_json);
}

#[tokio::test]
async fn differently_cased_tickers_share_one_cache_entry() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("AAPL", daily_series("AAPL", "2023-12-22", &closes));
    let (service, store) = mean_service(provider);

    service
        .predict(request("aapl", 5, "2024-01-10"))
        .await
        .expect("lowercase request succeeds");
    service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect("uppercase request succeeds");

    assert_eq!(store.forecaster.call_count(), 1);
}

// =============================================================================
// Terminal errors
// =============================================================================

#[tokio::test]
async fn missing_artifacts_yield_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = PredictionService::new(
        Arc::new(FsModelStore::new(dir.path())),
        Arc::new(StubProvider::new()),
        Arc::new(MemoryCache::new()),
    );

    let err = service
        .predict(request("GHOST", 5, "2024-01-10"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn window_larger_than_history_is_invalid() {
    let provider = StubProvider::new().with_series(
        "AAPL",
        daily_series("AAPL", "2024-01-08", &[100.0, 101.0, 102.0]),
    );
    let (service, _store) = mean_service(provider);

    let err = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn zero_window_is_invalid() {
    let (service, _store) = mean_service(StubProvider::new());

    let err = service
        .predict(request("AAPL", 0, "2024-01-10"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn provider_failure_is_absorbed_into_validation() {
    // No series registered: the fetch fails upstream, the service validates
    // against an empty history, and the caller sees a 400, never a 500.
    let (service, store) = mean_service(StubProvider::new());

    let err = service
        .predict(request("AAPL", 5, "2024-01-10"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(store.forecaster.call_count(), 0);
}

// =============================================================================
// Boundary normalization
// =============================================================================

#[tokio::test]
async fn renamed_tickers_are_served_under_the_current_symbol() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let provider = StubProvider::new().with_series("META", daily_series("META", "2023-12-22", &closes));
    let (service, _store) = mean_service(provider);

    let result = service
        .predict(request("FB", 5, "2024-01-10"))
        .await
        .expect("renamed request succeeds");

    assert_eq!(result.ticker.as_str(), "META");
}
