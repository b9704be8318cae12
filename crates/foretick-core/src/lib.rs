//! # Foretick Core
//!
//! Core contracts and domain types for the Foretick serving layer.
//!
//! ## Overview
//!
//! This crate provides the foundational components for Foretick:
//!
//! - **Canonical domain models** for tickers, trading days, and OHLCV series
//! - **Cache key derivation** for prediction and quote requests
//! - **Cache abstractions**: a durable write-through cache contract and an
//!   in-process TTL cache for short-lived snapshots
//! - **Provider contract** for the daily time-series collaborator
//! - **HTTP transport seam** so provider adapters stay testable offline
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Durable cache trait and in-process TTL cache |
//! | [`cache_key`] | Canonical cache key derivation |
//! | [`domain`] | Domain models (Ticker, TradingDay, DailySeries) |
//! | [`error`] | Core validation errors |
//! | [`provider`] | Daily series provider trait and errors |
//! | [`transport`] | HTTP client abstraction |
//!
//! ## Error Handling
//!
//! All fallible operations return `Result` with structured errors. The one
//! deliberate exception is the [`cache::PredictionCache`] contract, whose
//! operations are infallible at the call site: a degraded cache backend must
//! never fail or block the request pipeline, so implementations absorb their
//! own transport errors and report a miss instead.

pub mod cache;
pub mod cache_key;
pub mod domain;
pub mod error;
pub mod provider;
pub mod transport;

// Re-export commonly used types at crate root for convenience

pub use cache::{NoopCache, PredictionCache, TtlCache};
pub use cache_key::{prediction_key, quotes_key};
pub use domain::{ClosePoint, DailySeries, OhlcvRow, Ticker, TradingDay};
pub use error::ValidationError;
pub use provider::{ProviderError, SeriesProvider, TickerCloses};
pub use transport::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
