//! Property-based tests for the SM-2 scheduler
//!
//! Invariants checked:
//! - Ease factor never drops below 1.3
//! - A failed recall resets repetitions, interval and mastery
//! - A successful recall extends the run by exactly one
//! - Mastery is a pure function of repetitions
//! - Intervals are at least one day
//! - Review timestamps move forward by whole calendar days

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use study_review::models::sm2::{MIN_EASE_FACTOR, evaluate, mastery_of, next_review_timestamp};
use study_review::{MasteryLevel, ReviewAction, ReviewState};

fn arb_ease_factor() -> impl Strategy<Value = f64> {
    MIN_EASE_FACTOR..=4.0f64
}

fn arb_repetitions() -> impl Strategy<Value = u32> {
    0u32..=50
}

fn arb_action() -> impl Strategy<Value = ReviewAction> {
    prop_oneof![
        Just(ReviewAction::StillLearning),
        Just(ReviewAction::GettingThere),
        Just(ReviewAction::Almost),
        Just(ReviewAction::Mastered),
        Just(ReviewAction::Unrecognized),
    ]
}

proptest! {
    #[test]
    fn ease_factor_stays_above_floor(
        ease_factor in arb_ease_factor(),
        repetitions in arb_repetitions(),
        rating in 0i32..=5,
    ) {
        let next = evaluate(ease_factor, repetitions, rating);
        prop_assert!(next.ease_factor >= MIN_EASE_FACTOR);
    }

    #[test]
    fn failed_recall_resets(
        ease_factor in arb_ease_factor(),
        repetitions in arb_repetitions(),
        rating in -20i32..3,
    ) {
        let next = evaluate(ease_factor, repetitions, rating);
        prop_assert_eq!(next.repetitions, 0);
        prop_assert_eq!(next.interval_days, 1);
        prop_assert_eq!(next.mastery, MasteryLevel::Unfamiliar);
    }

    #[test]
    fn success_extends_run_by_one(
        ease_factor in arb_ease_factor(),
        repetitions in arb_repetitions(),
        rating in 3i32..=5,
    ) {
        let next = evaluate(ease_factor, repetitions, rating);
        prop_assert_eq!(next.repetitions, repetitions + 1);
        prop_assert_eq!(next.mastery, mastery_of(repetitions + 1));
    }

    #[test]
    fn interval_is_at_least_one_day(
        ease_factor in arb_ease_factor(),
        repetitions in any::<u32>(),
        rating in any::<i32>(),
    ) {
        prop_assert!(evaluate(ease_factor, repetitions, rating).interval_days >= 1);
    }

    #[test]
    fn evaluate_is_deterministic(
        ease_factor in arb_ease_factor(),
        repetitions in arb_repetitions(),
        rating in 0i32..=5,
    ) {
        prop_assert_eq!(
            evaluate(ease_factor, repetitions, rating),
            evaluate(ease_factor, repetitions, rating)
        );
    }

    #[test]
    fn mastery_matches_tier_table(repetitions in any::<u32>()) {
        let expected = match repetitions {
            0 => MasteryLevel::Unfamiliar,
            1 => MasteryLevel::Learning,
            2..=3 => MasteryLevel::Familiar,
            _ => MasteryLevel::Mastered,
        };
        prop_assert_eq!(mastery_of(repetitions), expected);
    }

    #[test]
    fn review_timestamp_adds_whole_days(offset_secs in 0i64..=3_000_000_000, days in 0u32..=3650) {
        let reference = Utc.timestamp_opt(offset_secs, 0).unwrap();
        let next = next_review_timestamp(reference, days);
        prop_assert_eq!(next - reference, Duration::days(i64::from(days)));
    }

    #[test]
    fn rating_sequences_keep_invariants(actions in proptest::collection::vec(arb_action(), 1..40)) {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let mut state = ReviewState::new(start);
        let mut now = start;

        for action in actions {
            let before = state.repetitions;
            let (next, evaluation) = state.apply_rating(action.rating(), now);

            prop_assert!(next.ease_factor >= MIN_EASE_FACTOR);
            prop_assert!(evaluation.interval_days >= 1);
            if action == ReviewAction::StillLearning {
                prop_assert_eq!(next.repetitions, 0);
            } else {
                prop_assert_eq!(next.repetitions, before + 1);
            }
            prop_assert_eq!(next.mastery(), mastery_of(next.repetitions));
            prop_assert!(next.next_review_at > now);

            now = next.next_review_at;
            state = next;
        }
    }
}
