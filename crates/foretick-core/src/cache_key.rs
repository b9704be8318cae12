//! Canonical cache key derivation.
//!
//! Keys are derived from already-normalized domain types, so semantically
//! identical requests collapse to one key regardless of how the client
//! formatted the ticker or the date. Pure string construction, no I/O.

use crate::{Ticker, TradingDay};

/// Key for a prediction request: `predict:{TICKER}:w{window}:{YYYY-MM-DD}`.
pub fn prediction_key(ticker: &Ticker, window: usize, end_day: TradingDay) -> String {
    format!("predict:{ticker}:w{window}:{end_day}")
}

/// Key for a quote snapshot: the sorted, de-duplicated ticker list.
pub fn quotes_key(tickers: &[Ticker]) -> String {
    let mut canonical: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
    canonical.sort_unstable();
    canonical.dedup();
    format!("quotes:{}", canonical.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).expect("valid ticker")
    }

    #[test]
    fn equivalent_requests_share_a_key() {
        let day = TradingDay::parse("2024-01-10").expect("valid day");
        let lower = prediction_key(&ticker("aapl"), 5, day);
        let upper = prediction_key(&ticker("AAPL"), 5, day);
        assert_eq!(lower, upper);
        assert_eq!(lower, "predict:AAPL:w5:2024-01-10");
    }

    #[test]
    fn distinct_requests_get_distinct_keys() {
        let day = TradingDay::parse("2024-01-10").expect("valid day");
        let a = prediction_key(&ticker("AAPL"), 5, day);
        let b = prediction_key(&ticker("AAPL"), 6, day);
        let c = prediction_key(&ticker("MSFT"), 5, day);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn quote_key_sorts_and_dedups() {
        let unordered = quotes_key(&[ticker("msft"), ticker("AAPL"), ticker("MSFT")]);
        let ordered = quotes_key(&[ticker("AAPL"), ticker("MSFT")]);
        assert_eq!(unordered, ordered);
        assert_eq!(ordered, "quotes:AAPL,MSFT");
    }
}
