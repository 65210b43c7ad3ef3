//! Weekly review: which relationships need attention this week.

mod priority;

pub use priority::{
    rank_top_priorities, PriorityRanker, PriorityRow, PriorityWeights, ReviewCandidate,
    DEFAULT_REVIEW_LIMIT,
};
