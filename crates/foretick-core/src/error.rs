use thiserror::Error;

/// Validation and contract errors exposed by `foretick-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("trading day must be YYYY-MM-DD: '{value}'")]
    InvalidTradingDay { value: String },
    #[error("trading day arithmetic out of range")]
    TradingDayOutOfRange,

    #[error("window size must be greater than zero")]
    ZeroWindow,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("row high must be >= low")]
    InvalidRowRange,
    #[error("row open/close must be within high/low range")]
    InvalidRowBounds,
}
