//! Daily time-series provider contract.
//!
//! The provider is an external collaborator: it returns flat, single-level
//! OHLCV rows indexed by trading day. Any column normalization belongs to
//! the adapter behind this trait, never to the serving core.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::{ClosePoint, DailySeries, Ticker, TradingDay};

/// Provider-level failure. Callers absorb these per the serving contract:
/// prediction validation treats a failed fetch as an empty series, and the
/// quote aggregator falls back from batch to sequential fetches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed provider response: {0}")]
    InvalidResponse(String),
    #[error("provider returned no data for '{ticker}'")]
    NoData { ticker: Ticker },
}

/// The last observed close prices for one ticker, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerCloses {
    pub ticker: Ticker,
    pub closes: Vec<ClosePoint>,
}

/// Daily series provider contract.
///
/// Implementations must be `Send + Sync`; one instance is shared by all
/// in-flight requests. All methods are expected to bound their network
/// calls with timeouts so a slow upstream cannot occupy a worker
/// indefinitely.
pub trait SeriesProvider: Send + Sync {
    /// Fetch daily OHLCV rows for `ticker` between `start` and `end`
    /// inclusive.
    fn history<'a>(
        &'a self,
        ticker: &'a Ticker,
        start: TradingDay,
        end: TradingDay,
    ) -> Pin<Box<dyn Future<Output = Result<DailySeries, ProviderError>> + Send + 'a>>;

    /// Fetch the last two trading days of closes for a batch of tickers.
    ///
    /// Tickers the provider knows nothing about are simply absent from the
    /// result; they do not fail the batch.
    fn recent_closes<'a>(
        &'a self,
        tickers: &'a [Ticker],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TickerCloses>, ProviderError>> + Send + 'a>>;

    /// Fetch the last two trading days of closes for a single ticker; the
    /// sequential-fallback path of the quote aggregator.
    fn recent_closes_one<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<TickerCloses, ProviderError>> + Send + 'a>>;
}
