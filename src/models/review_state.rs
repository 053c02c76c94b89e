use super::MasteryLevel;
use super::sm2::{self, Evaluation};
use crate::error::ReviewError;
use crate::validation::validate_ease_factor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduling state of one item for one learner.
///
/// The mastery tier is not a field: it is always derived from `repetitions`.
/// The serialized form carries it for readers, and it is recomputed on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredReviewState", try_from = "StoredReviewState")]
pub struct ReviewState {
    pub ease_factor: f64,
    pub repetitions: u32,
    pub interval_days: u32,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// Fresh state for an item shown for the first time; due right away.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: sm2::DEFAULT_EASE_FACTOR,
            repetitions: 0,
            interval_days: 0,
            next_review_at: now,
            last_reviewed_at: None,
        }
    }

    pub fn mastery(&self) -> MasteryLevel {
        sm2::mastery_of(self.repetitions)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Returns the state after rating the item at `now`; `self` is left as is.
    pub fn apply_rating(&self, rating: i32, now: DateTime<Utc>) -> (ReviewState, Evaluation) {
        let evaluation = sm2::evaluate(self.ease_factor, self.repetitions, rating);
        let next = ReviewState {
            ease_factor: evaluation.ease_factor,
            repetitions: evaluation.repetitions,
            interval_days: evaluation.interval_days,
            next_review_at: sm2::next_review_timestamp(now, evaluation.interval_days),
            last_reviewed_at: Some(now),
        };
        (next, evaluation)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredReviewState {
    ease_factor: f64,
    repetitions: u32,
    #[serde(default)]
    interval_days: u32,
    // Written for readers, ignored on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mastery: Option<MasteryLevel>,
    next_review_at: DateTime<Utc>,
    #[serde(default)]
    last_reviewed_at: Option<DateTime<Utc>>,
}

impl From<ReviewState> for StoredReviewState {
    fn from(state: ReviewState) -> Self {
        Self {
            mastery: Some(state.mastery()),
            ease_factor: state.ease_factor,
            repetitions: state.repetitions,
            interval_days: state.interval_days,
            next_review_at: state.next_review_at,
            last_reviewed_at: state.last_reviewed_at,
        }
    }
}

impl TryFrom<StoredReviewState> for ReviewState {
    type Error = ReviewError;

    fn try_from(stored: StoredReviewState) -> Result<Self, Self::Error> {
        let ease_factor = validate_ease_factor(stored.ease_factor)?;
        Ok(Self {
            ease_factor: ease_factor.max(sm2::MIN_EASE_FACTOR),
            repetitions: stored.repetitions,
            interval_days: stored.interval_days,
            next_review_at: stored.next_review_at,
            last_reviewed_at: stored.last_reviewed_at,
        })
    }
}
