//! Human-readable phrasing for contact metrics and review rows.

use chrono::NaiveDate;

/// Shown when a date is absent.
pub const MISSING: &str = "—";

fn days(n: i64) -> String {
    let abs = n.unsigned_abs();
    if abs == 1 {
        "1 day".to_string()
    } else {
        format!("{abs} days")
    }
}

/// Describe a signed `days_until_next`.
///
/// Negative values read as overdue, zero as due today, positive as a
/// countdown. `placeholder` is returned when there is no due date.
pub fn describe_due(days_until_next: Option<i64>, placeholder: &str) -> String {
    match days_until_next {
        None => placeholder.to_string(),
        Some(0) => "Due today".to_string(),
        Some(n) if n < 0 => format!("{} overdue", days(n)),
        Some(n) => format!("in {}", days(n)),
    }
}

/// Describe a signed day offset relative to today (positive = past).
pub fn describe_relative_days(days_ago: Option<i64>) -> String {
    match days_ago {
        None => String::new(),
        Some(0) => "today".to_string(),
        Some(n) if n > 0 => format!("{} ago", days(n)),
        Some(n) => format!("in {}", days(n)),
    }
}

/// `Jan 5, 2024`, or [`MISSING`].
pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => MISSING.to_string(),
    }
}

pub fn describe_open_loops(count: u32) -> String {
    match count {
        0 => "No open loops".to_string(),
        1 => "1 open loop".to_string(),
        n => format!("{n} open loops"),
    }
}

pub fn describe_recency(recency_days: Option<i64>) -> String {
    match recency_days {
        Some(n) => format!("Recency: {n}d"),
        None => format!("Recency: {MISSING}"),
    }
}

pub fn describe_last_contact(last: Option<NaiveDate>) -> String {
    match last {
        Some(_) => format!("Last: {}", format_display_date(last)),
        None => "No interactions yet".to_string(),
    }
}
