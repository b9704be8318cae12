use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::ValidationError;

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar trading day with a canonical `YYYY-MM-DD` representation.
///
/// Parse and display are inverses, so a day that round-trips through a cache
/// key or a JSON payload always compares equal to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDay(Date);

impl TradingDay {
    /// The current UTC calendar date.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, DAY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTradingDay {
                value: input.to_owned(),
            })
    }

    /// The day `days` calendar days earlier.
    pub fn days_before(self, days: u32) -> Result<Self, ValidationError> {
        self.0
            .checked_sub(Duration::days(i64::from(days)))
            .map(Self)
            .ok_or(ValidationError::TradingDayOutOfRange)
    }

    /// Seconds since the Unix epoch at midnight UTC of this day.
    pub fn unix_midnight(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    /// Build from a Unix timestamp, keeping only the UTC calendar date.
    pub fn from_unix_timestamp(ts: i64) -> Result<Self, ValidationError> {
        OffsetDateTime::from_unix_timestamp(ts)
            .map(|dt| Self(dt.date()))
            .map_err(|_| ValidationError::TradingDayOutOfRange)
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_canonical(self) -> String {
        self.0
            .format(DAY_FORMAT)
            .expect("trading day must be formattable")
    }
}

impl From<Date> for TradingDay {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for TradingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_canonical())
    }
}

impl Serialize for TradingDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_canonical())
    }
}

impl<'de> Deserialize<'de> for TradingDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
