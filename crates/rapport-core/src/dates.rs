//! Day-granularity date handling shared by the scheduler and the ranker.
//!
//! Everything downstream works on [`NaiveDate`]: a timestamp is reduced to
//! its calendar day before any arithmetic, so "days since" and "days until"
//! are whole-day differences between midnights.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime};

/// A loosely typed date as it arrives from storage or user input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateInput {
    /// Already a calendar day.
    Date(NaiveDate),
    /// A timestamp; only its calendar day (in its own offset) is used.
    Timestamp(DateTime<FixedOffset>),
    /// Unparsed text, resolved leniently.
    Raw(String),
    #[default]
    Absent,
}

impl DateInput {
    /// Resolve to a calendar day. Unparsable text resolves to `None`.
    pub fn resolve(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Date(d) => Some(*d),
            DateInput::Timestamp(ts) => Some(ts.date_naive()),
            DateInput::Raw(s) => parse_date(s),
            DateInput::Absent => None,
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        DateInput::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        DateInput::Timestamp(ts)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Raw(s.to_string())
    }
}

impl From<&String> for DateInput {
    fn from(s: &String) -> Self {
        DateInput::Raw(s.clone())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Raw(s)
    }
}

impl<T: Into<DateInput>> From<Option<T>> for DateInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(DateInput::Absent, Into::into)
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a date string into a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and the naive
/// `YYYY-MM-DD HH:MM:SS` form SQLite's `datetime()` produces.
/// Returns `None` for anything else instead of failing.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// `date + days`, or `None` past the end of the representable calendar.
pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(parse_date("2024-01-01"), Some(d(2024, 1, 1)));
        assert_eq!(parse_date("  2024-03-01 "), Some(d(2024, 3, 1)));
    }

    #[test]
    fn parses_timestamps_to_their_calendar_day() {
        assert_eq!(parse_date("2024-01-01T23:30:00Z"), Some(d(2024, 1, 1)));
        assert_eq!(
            parse_date("2024-01-01T23:30:00-05:00"),
            Some(d(2024, 1, 1))
        );
        assert_eq!(parse_date("2024-02-10 08:15:00"), Some(d(2024, 2, 10)));
        assert_eq!(parse_date("2024-02-10T08:15:00.250"), Some(d(2024, 2, 10)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("bad"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn date_input_conversions() {
        assert_eq!(DateInput::from(None::<&str>), DateInput::Absent);
        assert_eq!(DateInput::from(Some("2024-01-05")).resolve(), Some(d(2024, 1, 5)));
        assert_eq!(DateInput::from("nope").resolve(), None);
        assert_eq!(DateInput::from(d(2024, 1, 5)).resolve(), Some(d(2024, 1, 5)));
        let ts = DateTime::parse_from_rfc3339("2024-06-01T02:00:00+09:00").unwrap();
        assert_eq!(DateInput::from(ts).resolve(), Some(d(2024, 6, 1)));
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(days_between(d(2024, 1, 1), d(2024, 1, 20)), 19);
        assert_eq!(days_between(d(2024, 1, 20), d(2024, 1, 15)), -5);
        // leap year
        assert_eq!(add_days(d(2024, 2, 28), 1), Some(d(2024, 2, 29)));
        assert_eq!(add_days(NaiveDate::MAX, 1), None);
    }
}
