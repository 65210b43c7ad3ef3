pub mod commitment;
pub mod config;
pub mod interaction;
pub mod note;
pub mod person;
pub mod review;

use chrono::{Local, NaiveDate};
use rapport_core::ValidationError;

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_day(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// `--today` if given, otherwise the local calendar date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate, ValidationError> {
    match today {
        Some(value) => parse_day(value),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_arguments() {
        assert_eq!(
            parse_day("2024-01-20").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
        );
        assert!(parse_day("20/01/2024").is_err());
        assert!(resolve_today(Some("nope")).is_err());
        assert!(resolve_today(None).is_ok());
    }
}
