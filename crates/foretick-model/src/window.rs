//! Feature window construction.

use foretick_core::{ClosePoint, DailySeries};

use crate::error::WindowError;
use crate::scaler::MinMaxScaler;

/// The model input window plus the raw history payload backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureWindow {
    /// Last `window` close prices, scaled; the model input.
    pub inputs: Vec<f64>,
    /// Last `window` raw closes with their dates; the human-readable
    /// history returned to the caller.
    pub history: Vec<ClosePoint>,
}

/// Build a fixed-length input window from a raw daily series.
///
/// All closes are transformed through the previously-fitted scaler and the
/// last `window` transformed points become the model input; the paired raw
/// closes are retained for the response payload.
pub fn build_window(
    series: &DailySeries,
    window: usize,
    scaler: &MinMaxScaler,
) -> Result<FeatureWindow, WindowError> {
    let closes = series.closes();
    if closes.is_empty() {
        return Err(WindowError::MissingCloses);
    }
    if closes.len() < window {
        return Err(WindowError::InsufficientData {
            have: closes.len(),
            need: window,
        });
    }

    let scaled = scaler.transform_all(&closes);
    let inputs = scaled[scaled.len() - window..].to_vec();

    let mut history = series.close_points();
    history.drain(..history.len() - window);

    Ok(FeatureWindow { inputs, history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use foretick_core::{OhlcvRow, Ticker, TradingDay};

    fn series(closes: &[f64]) -> DailySeries {
        let ticker = Ticker::parse("AAPL").expect("valid");
        let base = TradingDay::parse("2024-01-01").expect("valid");
        let rows = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                let day = TradingDay::from(
                    base.into_inner() + time::Duration::days(i as i64),
                );
                OhlcvRow::new(day, *close, close + 1.0, close - 1.0, *close, None)
                    .expect("valid row")
            })
            .collect();
        DailySeries::new(ticker, rows)
    }

    #[test]
    fn takes_the_last_window_points() {
        let series = series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let built = build_window(&series, 3, &MinMaxScaler::identity()).expect("must build");

        assert_eq!(built.inputs, vec![12.0, 13.0, 14.0]);
        assert_eq!(built.history.len(), 3);
        assert_eq!(built.history[0].close, 12.0);
        assert_eq!(built.history[2].close, 14.0);
    }

    #[test]
    fn scales_inputs_but_not_history() {
        let scaler = MinMaxScaler::from_bounds(10.0, 20.0).expect("valid bounds");
        let series = series(&[10.0, 15.0, 20.0]);
        let built = build_window(&series, 2, &scaler).expect("must build");

        assert_eq!(built.inputs, vec![0.5, 1.0]);
        assert_eq!(built.history[0].close, 15.0);
        assert_eq!(built.history[1].close, 20.0);
    }

    #[test]
    fn short_series_is_insufficient() {
        let series = series(&[10.0, 11.0]);
        let err = build_window(&series, 5, &MinMaxScaler::identity()).expect_err("must fail");
        assert_eq!(err, WindowError::InsufficientData { have: 2, need: 5 });
    }

    #[test]
    fn empty_series_has_no_closes() {
        let series = DailySeries::empty(Ticker::parse("AAPL").expect("valid"));
        let err = build_window(&series, 5, &MinMaxScaler::identity()).expect_err("must fail");
        assert_eq!(err, WindowError::MissingCloses);
    }
}
