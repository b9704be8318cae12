//! Yahoo Finance daily-series provider.
//!
//! Uses the v8 chart endpoint for per-ticker history and the v7 spark
//! endpoint for batched two-day close windows. Rows with incomplete OHLC
//! values are dropped during normalization, so the core always sees a
//! flat, fully-populated column set.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use foretick_core::{
    ClosePoint, DailySeries, HttpClient, HttpRequest, OhlcvRow, ProviderError, SeriesProvider,
    Ticker, TickerCloses, TradingDay,
};

const CHART_TIMEOUT_MS: u64 = 10_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Provider adapter over the unofficial Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooSeriesProvider {
    http: Arc<dyn HttpClient>,
}

impl YahooSeriesProvider {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    async fn fetch(&self, url: String) -> Result<String, ProviderError> {
        let request = HttpRequest::get(url).with_timeout_ms(CHART_TIMEOUT_MS);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ProviderError::Unavailable(e.message().to_owned()))?;

        if !response.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    async fn fetch_chart(&self, ticker: &Ticker, query: &str) -> Result<ChartResult, ProviderError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?{query}",
            urlencoding::encode(ticker.as_str()),
        );
        let body = self.fetch(url).await?;

        let parsed: ChartResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoData {
                ticker: ticker.clone(),
            })
    }
}

impl SeriesProvider for YahooSeriesProvider {
    fn history<'a>(
        &'a self,
        ticker: &'a Ticker,
        start: TradingDay,
        end: TradingDay,
    ) -> Pin<Box<dyn Future<Output = Result<DailySeries, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            // period2 is exclusive; push it past midnight so `end` is included.
            let query = format!(
                "period1={}&period2={}&interval=1d",
                start.unix_midnight(),
                end.unix_midnight() + SECONDS_PER_DAY,
            );
            let result = self.fetch_chart(ticker, &query).await?;
            Ok(DailySeries::new(ticker.clone(), chart_rows(&result)))
        })
    }

    fn recent_closes<'a>(
        &'a self,
        tickers: &'a [Ticker],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TickerCloses>, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            if tickers.is_empty() {
                return Ok(Vec::new());
            }

            let symbols = tickers
                .iter()
                .map(Ticker::as_str)
                .collect::<Vec<_>>()
                .join(",");
            let url = format!(
                "https://query1.finance.yahoo.com/v7/finance/spark?symbols={}&range=2d&interval=1d",
                urlencoding::encode(&symbols),
            );
            let body = self.fetch(url).await?;

            let parsed: SparkResponse = serde_json::from_str(&body)
                .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

            let batch = parsed
                .spark
                .result
                .unwrap_or_default()
                .into_iter()
                .filter_map(|entry| {
                    let ticker = Ticker::parse(&entry.symbol).ok()?;
                    let result = entry.response.unwrap_or_default().into_iter().next()?;
                    Some(TickerCloses {
                        ticker,
                        closes: chart_closes(&result),
                    })
                })
                .collect();

            Ok(batch)
        })
    }

    fn recent_closes_one<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<TickerCloses, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let result = self.fetch_chart(ticker, "range=2d&interval=1d").await?;
            Ok(TickerCloses {
                ticker: ticker.clone(),
                closes: chart_closes(&result),
            })
        })
    }
}

/// Normalize one chart result into validated OHLCV rows, dropping indices
/// with incomplete values.
fn chart_rows(result: &ChartResult) -> Vec<OhlcvRow> {
    let timestamps = match &result.timestamp {
        Some(ts) => ts,
        None => return Vec::new(),
    };
    let quote = match result.indicators.quote.first() {
        Some(quote) => quote,
        None => return Vec::new(),
    };

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let day = match TradingDay::from_unix_timestamp(ts) {
            Ok(day) => day,
            Err(_) => continue,
        };

        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) {
            let volume = quote
                .volume
                .get(i)
                .copied()
                .flatten()
                .map(|v| v as u64);

            if let Ok(row) = OhlcvRow::new(day, *open, *high, *low, *close, volume) {
                rows.push(row);
            }
        }
    }

    rows
}

/// Extract dated closes from a chart result, oldest first.
fn chart_closes(result: &ChartResult) -> Vec<ClosePoint> {
    let timestamps = match &result.timestamp {
        Some(ts) => ts,
        None => return Vec::new(),
    };
    let quote = match result.indicators.quote.first() {
        Some(quote) => quote,
        None => return Vec::new(),
    };

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = TradingDay::from_unix_timestamp(ts).ok()?;
            let close = quote.close.get(i).copied().flatten()?;
            Some(ClosePoint { date, close })
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SparkResponse {
    spark: SparkData,
}

#[derive(Debug, Clone, Deserialize)]
struct SparkData {
    result: Option<Vec<SparkResult>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SparkResult {
    symbol: String,
    response: Option<Vec<ChartResult>>,
}
