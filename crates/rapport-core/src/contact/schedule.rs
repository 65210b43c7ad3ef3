//! Next-contact-due estimation.
//!
//! Given when someone was last contacted and how often the user wants to be
//! in touch, work out how stale the relationship is and when the next
//! touchpoint is due. Bad or missing input never fails; it widens the
//! affected fields to `None` so callers can always render something.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, days_between, DateInput};

/// Temporal metrics for one person, computed fresh for a given `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMetrics {
    pub last_contact_date: Option<NaiveDate>,
    /// Never negative: a last contact in the future counts as zero days ago.
    pub days_since_last: Option<i64>,
    pub next_contact_date: Option<NaiveDate>,
    /// Signed: negative means overdue by that many days, zero means due today.
    pub days_until_next: Option<i64>,
    pub is_overdue: bool,
}

impl ContactMetrics {
    /// Metrics for someone with no recorded contact.
    pub const NONE: ContactMetrics = ContactMetrics {
        last_contact_date: None,
        days_since_last: None,
        next_contact_date: None,
        days_until_next: None,
        is_overdue: false,
    };
}

/// Reduce a user-configured frequency to a whole number of days.
///
/// Only finite, strictly positive values count. Fractions round to the
/// nearest day; a frequency that rounds down to zero is treated as absent.
pub fn sanitize_frequency(frequency_days: Option<f64>) -> Option<u32> {
    let f = frequency_days?;
    if !f.is_finite() || f <= 0.0 {
        return None;
    }
    let rounded = f.round();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

/// Compute contact metrics from a single last-contact value.
pub fn compute_schedule(
    last_contact: impl Into<DateInput>,
    ideal_frequency_days: Option<f64>,
    today: NaiveDate,
) -> ContactMetrics {
    let Some(last) = last_contact.into().resolve() else {
        return ContactMetrics::NONE;
    };

    let days_since_last = days_between(last, today).max(0);
    let next_contact_date =
        sanitize_frequency(ideal_frequency_days).and_then(|freq| add_days(last, freq));
    let days_until_next = next_contact_date.map(|next| days_between(today, next));
    let is_overdue = next_contact_date.is_some_and(|next| today > next);

    ContactMetrics {
        last_contact_date: Some(last),
        days_since_last: Some(days_since_last),
        next_contact_date,
        days_until_next,
        is_overdue,
    }
}

/// Compute contact metrics from a set of interaction dates.
///
/// The most recent date that parses wins; unparsable dates are skipped.
/// With no usable date this behaves as "never contacted".
pub fn compute_schedule_from_interactions<I>(
    interaction_dates: I,
    ideal_frequency_days: Option<f64>,
    today: NaiveDate,
) -> ContactMetrics
where
    I: IntoIterator,
    I::Item: Into<DateInput>,
{
    let most_recent = interaction_dates
        .into_iter()
        .filter_map(|date| date.into().resolve())
        .max();
    compute_schedule(most_recent, ideal_frequency_days, today)
}
