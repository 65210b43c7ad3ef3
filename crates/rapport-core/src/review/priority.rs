//! Weekly review priority ranking.
//!
//! Scores each relationship by a linear combination of:
//! - importance (user rating),
//! - recency (days since last contact, capped; never-contacted counts as the cap),
//! - open loops (open commitments due soon or undated),
//!
//! and returns the highest-scoring people first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{days_between, DateInput};
use crate::people::DEFAULT_IMPORTANCE;

/// Default number of people surfaced by the weekly review.
pub const DEFAULT_REVIEW_LIMIT: usize = 5;

/// Score weights.
///
/// With the defaults one importance point is worth ten days of silence and
/// one open loop is worth fifteen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Points per importance level (default 10)
    pub importance: i64,
    /// Points per open loop (default 15)
    pub open_loop: i64,
    /// Recency ceiling in days, also the recency of a never-contacted person (default 60)
    pub recency_cap_days: i64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            importance: 10,
            open_loop: 15,
            recency_cap_days: 60,
        }
    }
}

/// One person's raw inputs to the review, as supplied by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCandidate {
    pub id: String,
    pub name: String,
    /// Defaults to [`DEFAULT_IMPORTANCE`] when missing.
    pub importance: Option<i64>,
    pub last_contact: DateInput,
    /// Defaults to zero when missing.
    pub open_loop_count: Option<u32>,
}

/// A scored review row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRow {
    pub person_id: String,
    pub name: String,
    pub importance: i64,
    pub last_contact_date: Option<NaiveDate>,
    pub open_loop_count: u32,
    /// Days since last contact, capped. `None` when there is no usable history.
    pub recency_days: Option<i64>,
    pub score: i64,
}

/// Ranks review candidates with a fixed set of weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityRanker {
    weights: PriorityWeights,
}

impl PriorityRanker {
    pub fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> PriorityWeights {
        self.weights
    }

    /// Score a single candidate.
    pub fn score(&self, candidate: &ReviewCandidate, today: NaiveDate) -> PriorityRow {
        let w = &self.weights;
        let importance = candidate.importance.unwrap_or(DEFAULT_IMPORTANCE);
        let open_loop_count = candidate.open_loop_count.unwrap_or(0);
        let last_contact_date = candidate.last_contact.resolve();

        let recency_days = last_contact_date
            .map(|last| days_between(last, today).max(0).min(w.recency_cap_days));
        let recency_for_scoring = recency_days.unwrap_or(w.recency_cap_days);

        let score = importance
            .saturating_mul(w.importance)
            .saturating_add(recency_for_scoring)
            .saturating_add(i64::from(open_loop_count).saturating_mul(w.open_loop));

        PriorityRow {
            person_id: candidate.id.clone(),
            name: candidate.name.clone(),
            importance,
            last_contact_date,
            open_loop_count,
            recency_days,
            score,
        }
    }

    /// Score every candidate, sort by descending score and keep the first `limit`.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank(
        &self,
        candidates: &[ReviewCandidate],
        today: NaiveDate,
        limit: usize,
    ) -> Vec<PriorityRow> {
        let mut rows: Vec<PriorityRow> = candidates
            .iter()
            .map(|c| self.score(c, today))
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows.truncate(limit);
        tracing::debug!(
            candidates = candidates.len(),
            returned = rows.len(),
            "ranked weekly review"
        );
        rows
    }
}

/// Rank with the default weights.
pub fn rank_top_priorities(
    candidates: &[ReviewCandidate],
    today: NaiveDate,
    limit: usize,
) -> Vec<PriorityRow> {
    PriorityRanker::default().rank(candidates, today, limit)
}
