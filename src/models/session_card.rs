//! Wrapper for a due study item that tracks progress within one review session.
use super::ReviewState;
use super::study_set::StudyItem;
use chrono::{DateTime, Utc};

#[derive(Clone, Debug)]
pub struct SessionCard {
    pub item_id: String,
    pub prompt: String,
    pub answer: String,
    pub state: ReviewState,
    pub passed: bool,
    pub last_rated_at: Option<DateTime<Utc>>,
}

impl SessionCard {
    /// Copies the item out of its study set; unseen items start from default state.
    pub fn new(item: StudyItem<'_>, now: DateTime<Utc>) -> Self {
        Self {
            item_id: item.id.to_string(),
            prompt: item.prompt.to_string(),
            answer: item.answer.to_string(),
            state: item.review.cloned().unwrap_or_else(|| ReviewState::new(now)),
            passed: false,
            last_rated_at: None,
        }
    }

    pub fn record_rating(&mut self, state: ReviewState, passed: bool, now: DateTime<Utc>) {
        self.state = state;
        self.passed = passed;
        self.last_rated_at = Some(now);
    }
}
