//! Contact cadence tracking.
//!
//! - [`schedule`]: per-person last/next contact metrics
//! - [`roster`]: the people list decorated with those metrics, sorted and filtered

mod roster;
mod schedule;

pub use roster::{build_roster, RosterEntry, RosterOptions, SortMode};
pub use schedule::{
    compute_schedule, compute_schedule_from_interactions, sanitize_frequency, ContactMetrics,
};
