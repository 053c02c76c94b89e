//! Flashcard is a pair <front, back> plus its review state once it has been shown.
use super::{MasteryLevel, ReviewState};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub position: u32,
    /// `None` until the card is first shown to the learner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewState>,
}

impl Flashcard {
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            position: 0,
            review: None,
        }
    }

    pub fn mastery(&self) -> MasteryLevel {
        self.review
            .as_ref()
            .map(ReviewState::mastery)
            .unwrap_or_default()
    }
}
