mod day;
mod series;
mod ticker;

pub use day::TradingDay;
pub use series::{ClosePoint, DailySeries, OhlcvRow};
pub use ticker::Ticker;
