//! # Foretick Serve
//!
//! The HTTP surface and request orchestration of Foretick.
//!
//! A prediction request is answered from the durable cache when possible;
//! on a miss the service resolves the ticker's artifacts, fetches the raw
//! series, builds the input window, runs inference, and writes the result
//! back through the cache before responding. Quote requests are batched,
//! cached in-process for a short TTL, and isolated per symbol: a ticker
//! that fails at every stage is omitted, never escalated to a batch error.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment-driven service configuration |
//! | [`error`] | API error type and HTTP status mapping |
//! | [`predict`] | Prediction orchestration |
//! | [`quotes`] | Quote aggregation with batch→sequential fallback |
//! | [`redis_cache`] | Durable cache client |
//! | [`routes`] | axum router and handlers |
//! | [`state`] | Shared application state |
//! | [`yahoo`] | Yahoo Finance series provider |

pub mod config;
pub mod error;
pub mod predict;
pub mod quotes;
pub mod redis_cache;
pub mod routes;
pub mod state;
pub mod yahoo;

pub use config::ServeConfig;
pub use error::ApiError;
pub use predict::{PredictRequest, PredictionResult, PredictionService};
pub use quotes::{QuoteChange, QuoteService};
pub use redis_cache::RedisCache;
pub use routes::app;
pub use state::AppState;
pub use yahoo::YahooSeriesProvider;
