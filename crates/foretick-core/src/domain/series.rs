use serde::{Deserialize, Serialize};

use crate::{Ticker, TradingDay, ValidationError};

/// OHLCV row for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRow {
    pub day: TradingDay,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl OhlcvRow {
    pub fn new(
        day: TradingDay,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidRowRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidRowBounds);
        }

        Ok(Self {
            day,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// A dated close price; the unit of history payloads and quote windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: TradingDay,
    pub close: f64,
}

/// Daily OHLCV series for one ticker with a flat, single-level column set.
///
/// Rows are kept in ascending date order; construction sorts so the core can
/// rely on ordering regardless of how a provider returned the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub ticker: Ticker,
    rows: Vec<OhlcvRow>,
}

impl DailySeries {
    pub fn new(ticker: Ticker, mut rows: Vec<OhlcvRow>) -> Self {
        rows.sort_by_key(|row| row.day);
        Self { ticker, rows }
    }

    pub fn empty(ticker: Ticker) -> Self {
        Self {
            ticker,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[OhlcvRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The close column, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.close).collect()
    }

    /// Dated close prices, oldest first.
    pub fn close_points(&self) -> Vec<ClosePoint> {
        self.rows
            .iter()
            .map(|row| ClosePoint {
                date: row.day,
                close: row.close,
            })
            .collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> TradingDay {
        TradingDay::parse(s).expect("valid day")
    }

    fn row(s: &str, close: f64) -> OhlcvRow {
        OhlcvRow::new(day(s), close, close + 1.0, close - 1.0, close, Some(1_000))
            .expect("valid row")
    }

    #[test]
    fn rejects_invalid_row_bounds() {
        let err = OhlcvRow::new(day("2024-01-02"), 10.0, 12.0, 9.0, 12.5, None)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidRowBounds));
    }

    #[test]
    fn sorts_rows_on_construction() {
        let ticker = Ticker::parse("AAPL").expect("valid");
        let series = DailySeries::new(
            ticker,
            vec![row("2024-01-03", 12.0), row("2024-01-01", 10.0), row("2024-01-02", 11.0)],
        );

        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn close_points_pair_dates_with_closes() {
        let ticker = Ticker::parse("MSFT").expect("valid");
        let series = DailySeries::new(ticker, vec![row("2024-01-01", 10.0)]);
        let points = series.close_points();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, day("2024-01-01"));
        assert_eq!(points[0].close, 10.0);
    }
}
