//! Quote aggregation.
//!
//! One batched two-day fetch covers every requested ticker; per-ticker
//! failures are isolated and never escalate to a batch error. If the batch
//! call itself fails or times out, each ticker is fetched sequentially
//! with the same per-ticker logic. Snapshots are cached in-process for a
//! short TTL keyed by the canonical ticker list.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use foretick_core::{quotes_key, ClosePoint, SeriesProvider, Ticker, TtlCache};

const QUOTE_TTL: Duration = Duration::from_secs(30);

/// Day-over-day change for one ticker, price fields rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteChange {
    pub ticker: Ticker,
    pub price: f64,
    pub change: f64,
    pub percent: f64,
}

/// Batch quote computation with snapshot caching and a batch→sequential
/// fallback.
pub struct QuoteService {
    provider: Arc<dyn SeriesProvider>,
    cache: TtlCache<Vec<QuoteChange>>,
    batch_timeout: Duration,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn SeriesProvider>, batch_timeout: Duration) -> Self {
        Self {
            provider,
            cache: TtlCache::new(QUOTE_TTL),
            batch_timeout,
        }
    }

    /// Compute quotes for the requested tickers, preserving input order.
    /// Tickers that fail at every stage are omitted from the result.
    pub async fn quotes(&self, tickers: &[Ticker]) -> Vec<QuoteChange> {
        if tickers.is_empty() {
            return Vec::new();
        }

        let key = quotes_key(tickers);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(%key, "quote snapshot cache hit");
            return cached;
        }

        let results =
            match tokio::time::timeout(self.batch_timeout, self.provider.recent_closes(tickers))
                .await
            {
                Ok(Ok(batch)) => {
                    let mut by_ticker: HashMap<Ticker, Vec<ClosePoint>> = HashMap::new();
                    for entry in batch {
                        by_ticker.insert(entry.ticker, entry.closes);
                    }

                    tickers
                        .iter()
                        .filter_map(|ticker| {
                            by_ticker
                                .get(ticker)
                                .and_then(|closes| compute_change(ticker.clone(), closes))
                        })
                        .collect()
                }
                Ok(Err(error)) => {
                    tracing::warn!(%error, "batched quote fetch failed; falling back to sequential");
                    self.sequential(tickers).await
                }
                Err(_) => {
                    tracing::warn!("batched quote fetch timed out; falling back to sequential");
                    self.sequential(tickers).await
                }
            };

        self.cache.put(key, results.clone()).await;
        results
    }

    async fn sequential(&self, tickers: &[Ticker]) -> Vec<QuoteChange> {
        let mut results = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            match self.provider.recent_closes_one(ticker).await {
                Ok(entry) => {
                    if let Some(quote) = compute_change(ticker.clone(), &entry.closes) {
                        results.push(quote);
                    }
                }
                Err(error) => {
                    tracing::debug!(%ticker, %error, "quote fetch failed for ticker; skipping");
                }
            }
        }
        results
    }
}

/// Day-over-day change from an ordered close window.
///
/// No closes → `None` (the ticker is skipped). One close → zero change.
/// `previous == 0` reports zero percent rather than dividing.
pub fn compute_change(ticker: Ticker, closes: &[ClosePoint]) -> Option<QuoteChange> {
    let last = closes.last()?;

    if closes.len() == 1 {
        return Some(QuoteChange {
            ticker,
            price: round_cents(last.close),
            change: 0.0,
            percent: 0.0,
        });
    }

    let previous = closes[closes.len() - 2];
    let change = last.close - previous.close;
    let percent = if previous.close == 0.0 {
        0.0
    } else {
        change / previous.close * 100.0
    };

    Some(QuoteChange {
        ticker,
        price: round_cents(last.close),
        change: round_cents(change),
        percent: round_cents(percent),
    })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
