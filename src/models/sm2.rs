//! SM-2 (SuperMemo 2) spaced repetition scheduler.
//!
//! Given an item's ease factor, its run of consecutive successful recalls and a
//! 0-5 quality rating, computes the next review interval and the updated state:
//! - Ratings below 3: recall failed, the run resets and the item comes back tomorrow
//! - Ratings 3-5: the interval grows 1 day → 6 days → EF × (repetitions − 1) × 6
//! - The easiness factor (EF) never drops below 1.3
//! - Mastery tier is a pure function of the repetition count
//!
//! Every function here is pure. Callers own the state and persist what they get back.

use super::{MasteryLevel, ReviewAction};
use chrono::{DateTime, Days, Utc};
use serde::Serialize;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Lowest rating that counts as a successful recall
pub const PASSING_RATING: i32 = 3;
pub const MAX_RATING: i32 = 5;

const FAILURE_EASE_PENALTY: f64 = 0.2;
const FIRST_INTERVAL_DAYS: u32 = 1;
const SECOND_INTERVAL_DAYS: u32 = 6;

/// Outcome of one rating. Serialized by `study-review rate --json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub interval_days: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub mastery: MasteryLevel,
}

impl Evaluation {
    pub fn passed(&self) -> bool {
        self.repetitions > 0
    }
}

/// Runs one SM-2 step.
/// rating: 0 = complete blackout, 5 = perfect recall. Values outside 0-5 are
/// not rejected; they take the same `< 3` / `>= 3` branch as any other value.
/// A NaN or infinite ease factor is treated as the 1.3 floor.
pub fn evaluate(ease_factor: f64, repetitions: u32, rating: i32) -> Evaluation {
    let ease_factor = if ease_factor.is_finite() {
        ease_factor
    } else {
        MIN_EASE_FACTOR
    };

    if rating < PASSING_RATING {
        // Failed recall: start over
        return Evaluation {
            interval_days: FIRST_INTERVAL_DAYS,
            ease_factor: (ease_factor - FAILURE_EASE_PENALTY).max(MIN_EASE_FACTOR),
            repetitions: 0,
            mastery: mastery_of(0),
        };
    }

    // Interval is keyed on the count before this success
    let interval_days = match repetitions {
        0 => FIRST_INTERVAL_DAYS,
        1 => SECOND_INTERVAL_DAYS,
        _ => {
            let days = (ease_factor * f64::from(repetitions - 1) * 6.0).round();
            // The cast saturates at u32::MAX
            days.max(1.0) as u32
        }
    };

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let distance = f64::from(MAX_RATING) - f64::from(rating);
    let new_ease_factor =
        (ease_factor + 0.1 - distance * (0.08 + distance * 0.02)).max(MIN_EASE_FACTOR);

    let new_repetitions = repetitions.saturating_add(1);

    Evaluation {
        interval_days,
        ease_factor: new_ease_factor,
        repetitions: new_repetitions,
        mastery: mastery_of(new_repetitions),
    }
}

pub fn mastery_of(repetitions: u32) -> MasteryLevel {
    MasteryLevel::from_repetitions(repetitions)
}

/// Quality score behind each rating button.
pub fn rating_from_action(action: ReviewAction) -> i32 {
    match action {
        ReviewAction::StillLearning => 1,
        ReviewAction::GettingThere => 3,
        ReviewAction::Almost => 4,
        ReviewAction::Mastered => 5,
        ReviewAction::Unrecognized => 3,
    }
}

/// Adds whole calendar days to `reference`. Saturates at the largest
/// instant chrono can represent.
pub fn next_review_timestamp(reference: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
    reference
        .checked_add_days(Days::new(u64::from(interval_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn next_review_from_now(interval_days: u32) -> DateTime<Utc> {
    next_review_timestamp(Utc::now(), interval_days)
}
