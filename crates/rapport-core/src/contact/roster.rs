//! The people list, decorated with contact metrics.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::{compute_schedule, ContactMetrics};
use crate::error::ValidationError;
use crate::people::{Person, PersonSummary};

/// Ordering of the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Case-insensitive by name.
    #[default]
    Name,
    /// Most recently contacted first; never contacted last.
    LastContact,
    /// Earliest next-contact date first; no cadence last.
    NextContact,
    /// Overdue people first, then soonest due.
    Overdue,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::LastContact => "last-contact",
            SortMode::NextContact => "next-contact",
            SortMode::Overdue => "overdue",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "name" => Ok(SortMode::Name),
            "last-contact" => Ok(SortMode::LastContact),
            "next-contact" => Ok(SortMode::NextContact),
            "overdue" => Ok(SortMode::Overdue),
            _ => Err(ValidationError::InvalidValue {
                field: "sort".into(),
                message: format!(
                    "unknown sort mode '{s}' (expected name, last-contact, next-contact or overdue)"
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RosterOptions {
    pub sort: SortMode,
    pub overdue_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub person: Person,
    pub metrics: ContactMetrics,
}

/// Decorate each person with their contact metrics, then filter and sort.
pub fn build_roster(
    people: Vec<PersonSummary>,
    today: NaiveDate,
    options: RosterOptions,
) -> Vec<RosterEntry> {
    let mut entries: Vec<RosterEntry> = people
        .into_iter()
        .map(|summary| {
            let metrics = compute_schedule(
                summary.last_contact_date,
                summary.person.frequency_days(),
                today,
            );
            RosterEntry {
                person: summary.person,
                metrics,
            }
        })
        .filter(|entry| !options.overdue_only || entry.metrics.is_overdue)
        .collect();

    match options.sort {
        SortMode::Name => entries.sort_by_cached_key(|e| e.person.name.to_lowercase()),
        SortMode::LastContact => entries.sort_by(|a, b| {
            // Some(_) > None, so reversing puts never-contacted people last.
            b.metrics.last_contact_date.cmp(&a.metrics.last_contact_date)
        }),
        SortMode::NextContact => entries.sort_by(|a, b| {
            none_last(a.metrics.next_contact_date, b.metrics.next_contact_date)
        }),
        SortMode::Overdue => entries.sort_by(|a, b| {
            b.metrics
                .is_overdue
                .cmp(&a.metrics.is_overdue)
                .then_with(|| none_last(a.metrics.days_until_next, b.metrics.days_until_next))
        }),
    }
    entries
}

fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
