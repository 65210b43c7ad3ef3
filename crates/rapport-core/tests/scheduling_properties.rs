//! Property tests for contact scheduling and review ranking.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rapport_core::{
    compute_schedule, compute_schedule_from_interactions, rank_top_priorities, DateInput,
    ReviewCandidate,
};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn day(offset: u32) -> NaiveDate {
    base().checked_add_days(Days::new(u64::from(offset))).unwrap()
}

fn candidate_strategy() -> impl Strategy<Value = ReviewCandidate> {
    (
        "[a-z]{1,8}",
        prop::option::of(0i64..=5),
        prop::option::of(0u32..2000),
        prop::option::of(0u32..10),
    )
        .prop_map(|(id, importance, last, loops)| ReviewCandidate {
            name: id.to_uppercase(),
            id,
            importance,
            last_contact: last.map(day).into(),
            open_loop_count: loops,
        })
}

proptest! {
    #[test]
    fn days_since_last_is_never_negative(
        last in 0u32..3000,
        today in 0u32..3000,
        freq in prop::option::of(-10.0f64..400.0),
    ) {
        let m = compute_schedule(day(last), freq, day(today));
        prop_assert!(m.days_since_last.unwrap() >= 0);
    }

    #[test]
    fn overdue_iff_next_date_strictly_past(
        last in 0u32..3000,
        today in 0u32..3000,
        freq in 1u32..400,
    ) {
        let m = compute_schedule(day(last), Some(f64::from(freq)), day(today));
        let until = m.days_until_next.unwrap();
        prop_assert_eq!(m.next_contact_date, Some(day(last + freq)));
        prop_assert_eq!(m.is_overdue, until < 0);
        if until == 0 {
            prop_assert!(!m.is_overdue);
        }
    }

    #[test]
    fn no_cadence_means_no_next_date(
        last in prop::option::of(0u32..3000),
        today in 0u32..3000,
        freq in prop::option::of(-100.0f64..=0.0),
    ) {
        let m = compute_schedule(last.map(day), freq, day(today));
        prop_assert_eq!(m.next_contact_date, None);
        prop_assert_eq!(m.days_until_next, None);
        prop_assert!(!m.is_overdue);
    }

    #[test]
    fn never_overdue_without_history(today in 0u32..3000, freq in 1.0f64..400.0) {
        let m = compute_schedule(DateInput::Absent, Some(freq), day(today));
        prop_assert!(!m.is_overdue);
        prop_assert_eq!(m.last_contact_date, None);
    }

    #[test]
    fn interactions_pick_the_latest(offsets in prop::collection::vec(0u32..3000, 1..20)) {
        let dates: Vec<String> = offsets
            .iter()
            .map(|o| day(*o).format("%Y-%m-%d").to_string())
            .chain(std::iter::once("not a date".to_string()))
            .collect();
        let m = compute_schedule_from_interactions(&dates, Some(30.0), day(3000));
        let expected = offsets.iter().copied().max().map(day);
        prop_assert_eq!(m.last_contact_date, expected);
    }

    #[test]
    fn scheduling_is_idempotent(
        last in prop::option::of(0u32..3000),
        today in 0u32..3000,
        freq in prop::option::of(-10.0f64..400.0),
    ) {
        let first = compute_schedule(last.map(day), freq, day(today));
        let second = compute_schedule(last.map(day), freq, day(today));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn interaction_scheduling_is_idempotent(
        offsets in prop::collection::vec(0u32..3000, 0..20),
        today in 0u32..3000,
        freq in prop::option::of(1.0f64..400.0),
    ) {
        let dates: Vec<String> = offsets
            .iter()
            .map(|o| day(*o).format("%Y-%m-%d").to_string())
            .collect();
        let first = compute_schedule_from_interactions(&dates, freq, day(today));
        let second = compute_schedule_from_interactions(&dates, freq, day(today));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ranking_is_sorted_truncated_and_idempotent(
        candidates in prop::collection::vec(candidate_strategy(), 0..30),
        today in 0u32..2500,
        limit in 0usize..10,
    ) {
        let first = rank_top_priorities(&candidates, day(today), limit);
        let second = rank_top_priorities(&candidates, day(today), limit);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), candidates.len().min(limit));
        prop_assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
        for row in &first {
            prop_assert!(row.recency_days.map_or(true, |r| (0..=60).contains(&r)));
        }
    }
}

#[test]
fn never_contacted_ties_with_sixty_days_silent() {
    let today = day(100);
    let rows = rank_top_priorities(
        &[
            ReviewCandidate {
                id: "never".into(),
                name: "Never".into(),
                importance: Some(3),
                last_contact: DateInput::Absent,
                open_loop_count: Some(0),
            },
            ReviewCandidate {
                id: "sixty".into(),
                name: "Sixty".into(),
                importance: Some(3),
                last_contact: day(40).into(),
                open_loop_count: Some(0),
            },
        ],
        today,
        5,
    );
    assert_eq!(rows[0].score, rows[1].score);
    assert_eq!(rows[0].person_id, "never");
    assert_eq!(rows[1].recency_days, Some(60));
}
