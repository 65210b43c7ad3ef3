//! # Rapport Core Library
//!
//! Business logic for Rapport, a personal relationship tracker. The
//! `rapport` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Contact scheduling**: pure, day-granularity computation of how long
//!   since someone was contacted and when the next touchpoint is due
//! - **Weekly review**: ranks people by importance, recency and open loops
//! - **Storage**: SQLite for people and their records, TOML for configuration
//!
//! Nothing in the scheduling or ranking code reads the clock. Every entry
//! point takes `today` explicitly.
//!
//! ## Key Components
//!
//! - [`compute_schedule`]: last contact + cadence → [`ContactMetrics`]
//! - [`PriorityRanker`]: review candidates → ranked [`PriorityRow`]s
//! - [`Database`]: people, interactions, commitments and notes
//! - [`Config`]: review weights and defaults

pub mod contact;
pub mod dates;
pub mod error;
pub mod format;
pub mod people;
pub mod review;
pub mod storage;

pub use contact::{
    build_roster, compute_schedule, compute_schedule_from_interactions, ContactMetrics,
    RosterEntry, RosterOptions, SortMode,
};
pub use dates::{parse_date, DateInput};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use people::{
    Commitment, CommitmentStatus, Interaction, InteractionKind, Person, PersonNote, PersonSummary,
};
pub use review::{
    rank_top_priorities, PriorityRanker, PriorityRow, PriorityWeights, ReviewCandidate,
};
pub use storage::{Config, Database, PersonUpdate};
