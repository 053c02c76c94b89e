//! Quiz questions are scheduled like flashcards; the prompt is the question, the answer the key.
use super::{MasteryLevel, ReviewState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    MultipleChoice,
    FillInBlank,
    Written,
    TrueFalse,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewState>,
}

impl QuizQuestion {
    /// Fill-in-the-blank answers are compared trimmed and case-insensitively,
    /// every other kind must match the key exactly.
    pub fn check_answer(&self, response: &str) -> bool {
        match self.kind {
            QuestionKind::FillInBlank => {
                response.trim().to_lowercase() == self.answer.trim().to_lowercase()
            }
            _ => response == self.answer,
        }
    }

    pub fn mastery(&self) -> MasteryLevel {
        self.review
            .as_ref()
            .map(ReviewState::mastery)
            .unwrap_or_default()
    }
}
