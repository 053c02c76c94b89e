//! Study set is the generated material for one upload: flashcards, quiz and notes,
//! together with each item's review state.
use super::sm2::Evaluation;
use super::{Flashcard, MasteryBreakdown, MasteryLevel, QuizQuestion, ReviewState};
use crate::error::{Result, ReviewError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the material came from. Parsing happens upstream; this is just a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    Pdf,
    Text,
    Youtube,
    Link,
    Audio,
    Image,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Text => "TEXT",
            Self::Youtube => "YOUTUBE",
            Self::Link => "LINK",
            Self::Audio => "AUDIO",
            Self::Image => "IMAGE",
        }
    }

    /// Case-insensitive inverse of `as_str`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PDF" => Some(Self::Pdf),
            "TEXT" => Some(Self::Text),
            "YOUTUBE" => Some(Self::Youtube),
            "LINK" => Some(Self::Link),
            "AUDIO" => Some(Self::Audio),
            "IMAGE" => Some(Self::Image),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySet {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_type: SourceType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Borrowed view over a flashcard or a quiz question.
#[derive(Clone, Copy, Debug)]
pub struct StudyItem<'a> {
    pub id: &'a str,
    pub prompt: &'a str,
    pub answer: &'a str,
    pub review: Option<&'a ReviewState>,
}

impl StudyItem<'_> {
    pub fn mastery(&self) -> MasteryLevel {
        self.review.map(ReviewState::mastery).unwrap_or_default()
    }

    /// Items never shown are due immediately.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.review.is_none_or(|state| state.is_due(now))
    }
}

impl StudySet {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        source_type: SourceType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subject: None,
            description: None,
            source_type,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            flashcards: Vec::new(),
            quiz: Vec::new(),
            notes: None,
        }
    }

    /// Flashcards first, then quiz questions.
    pub fn items(&self) -> impl Iterator<Item = StudyItem<'_>> {
        let cards = self.flashcards.iter().map(|card| StudyItem {
            id: &card.id,
            prompt: &card.front,
            answer: &card.back,
            review: card.review.as_ref(),
        });
        let questions = self.quiz.iter().map(|q| StudyItem {
            id: &q.id,
            prompt: &q.question,
            answer: &q.answer,
            review: q.review.as_ref(),
        });
        cards.chain(questions)
    }

    pub fn item(&self, item_id: &str) -> Option<StudyItem<'_>> {
        self.items().find(|item| item.id == item_id)
    }

    pub fn mastery_breakdown(&self) -> MasteryBreakdown {
        self.items().map(|item| item.mastery()).collect()
    }

    /// Items due at `now`, oldest due date first; never-shown items lead.
    pub fn due_items(&self, now: DateTime<Utc>) -> Vec<StudyItem<'_>> {
        let mut due: Vec<_> = self.items().filter(|item| item.is_due(now)).collect();
        due.sort_by_key(|item| item.review.map(|state| state.next_review_at));
        due
    }

    /// Earliest scheduled review among items that have been shown.
    pub fn next_review_at(&self) -> Option<DateTime<Utc>> {
        self.items()
            .filter_map(|item| item.review.map(|state| state.next_review_at))
            .min()
    }

    fn review_slot(&mut self, item_id: &str) -> Option<&mut Option<ReviewState>> {
        if let Some(card) = self.flashcards.iter_mut().find(|card| card.id == item_id) {
            return Some(&mut card.review);
        }
        self.quiz
            .iter_mut()
            .find(|q| q.id == item_id)
            .map(|q| &mut q.review)
    }

    /// Review state of an item, created with defaults the first time it is shown.
    pub fn review_mut(&mut self, item_id: &str, now: DateTime<Utc>) -> Result<&mut ReviewState> {
        let slot = self
            .review_slot(item_id)
            .ok_or_else(|| ReviewError::UnknownItem(item_id.to_string()))?;
        Ok(slot.get_or_insert_with(|| ReviewState::new(now)))
    }

    /// Rates one item: reads its state, runs the scheduler and stores the result.
    pub fn rate_item(
        &mut self,
        item_id: &str,
        rating: i32,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let state = self.review_mut(item_id, now)?;
        let (next, evaluation) = state.apply_rating(rating, now);
        *state = next;
        self.updated_at = now;

        tracing::debug!(
            item = item_id,
            rating,
            interval_days = evaluation.interval_days,
            ease_factor = evaluation.ease_factor,
            mastery = %evaluation.mastery,
            "Rated study item"
        );
        Ok(evaluation)
    }

    /// Appends a flashcard with a fresh `c<N>` id, N being one past the highest
    /// existing suffix, so ids stay unique after deletions or imports.
    pub fn add_flashcard(
        &mut self,
        front: impl Into<String>,
        back: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Flashcard {
        let next_number = self
            .items()
            .filter_map(|item| item.id.strip_prefix('c')?.parse::<u64>().ok())
            .max()
            .map_or(1, |n| n.saturating_add(1));
        let position = self
            .flashcards
            .iter()
            .map(|card| card.position.saturating_add(1))
            .max()
            .unwrap_or(0);

        let mut card = Flashcard::new(format!("c{next_number}"), front, back);
        card.position = position;
        self.updated_at = now;

        let index = self.flashcards.len();
        self.flashcards.push(card);
        &self.flashcards[index]
    }

    /// Overwrites an item's state with one computed elsewhere (e.g. a review session).
    pub fn set_review(&mut self, item_id: &str, state: ReviewState) -> Result<()> {
        let slot = self
            .review_slot(item_id)
            .ok_or_else(|| ReviewError::UnknownItem(item_id.to_string()))?;
        *slot = Some(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    fn create_test_set() -> StudySet {
        let mut set = StudySet::new("set-1", "Biology 101", SourceType::Pdf, now());
        set.flashcards = vec![
            Flashcard::new("c1", "What is DNA?", "Deoxyribonucleic acid"),
            Flashcard::new("c2", "What is osmosis?", "Diffusion of water"),
        ];
        set.quiz = vec![QuizQuestion {
            id: "q1".to_string(),
            kind: QuestionKind::FillInBlank,
            question: "Cells divide by ___.".to_string(),
            options: vec![],
            answer: "mitosis".to_string(),
            explanation: None,
            review: None,
        }];
        set
    }

    #[test]
    fn test_new_items_are_due_and_unfamiliar() {
        let set = create_test_set();
        assert_eq!(set.items().count(), 3);
        assert_eq!(set.due_items(now()).len(), 3);
        assert_eq!(set.mastery_breakdown().unfamiliar, 3);
        assert!(set.next_review_at().is_none());
    }

    #[test]
    fn test_rate_item_creates_and_updates_state() {
        let mut set = create_test_set();
        let later = now() + Duration::hours(2);

        let evaluation = set.rate_item("c1", 5, later).unwrap();
        assert_eq!(evaluation.interval_days, 1);
        assert_eq!(set.item("c1").unwrap().mastery(), MasteryLevel::Learning);
        assert!(set.item("c9").is_none());

        let state = set.flashcards[0].review.as_ref().unwrap();
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.next_review_at, later + Duration::days(1));
        assert_eq!(set.updated_at, later);

        let due: Vec<_> = set.due_items(later).iter().map(|i| i.id).collect();
        assert_eq!(due, vec!["c2", "q1"]);
        assert_eq!(set.next_review_at(), Some(later + Duration::days(1)));
    }

    #[test]
    fn test_rate_quiz_question() {
        let mut set = create_test_set();
        set.rate_item("q1", 4, now()).unwrap();
        set.rate_item("q1", 4, now()).unwrap();

        assert_eq!(set.quiz[0].mastery(), MasteryLevel::Familiar);
        let breakdown = set.mastery_breakdown();
        assert_eq!(breakdown.familiar, 1);
        assert_eq!(breakdown.unfamiliar, 2);
    }

    #[test]
    fn test_unknown_item_is_an_error() {
        let mut set = create_test_set();
        let result = set.rate_item("missing", 5, now());
        assert!(matches!(result, Err(ReviewError::UnknownItem(id)) if id == "missing"));
        assert!(set.set_review("missing", ReviewState::new(now())).is_err());
    }

    #[test]
    fn test_due_items_sorted_by_due_date() {
        let mut set = create_test_set();
        set.set_review(
            "c1",
            ReviewState {
                next_review_at: now() - Duration::days(1),
                ..ReviewState::new(now())
            },
        )
        .unwrap();
        set.set_review(
            "c2",
            ReviewState {
                next_review_at: now() - Duration::days(3),
                ..ReviewState::new(now())
            },
        )
        .unwrap();

        let due: Vec<_> = set.due_items(now()).iter().map(|i| i.id).collect();
        assert_eq!(due, vec!["q1", "c2", "c1"]);
    }

    #[test]
    fn test_add_flashcard_skips_taken_ids() {
        let mut set = create_test_set();
        set.flashcards[1].id = "c3".to_string();
        set.flashcards[1].position = 1;
        let later = now() + Duration::minutes(5);

        let added = set.add_flashcard("What is ATP?", "Energy carrier", later);
        assert_eq!(added.id, "c4");
        assert_eq!(added.position, 2);
        assert!(added.review.is_none());
        assert_eq!(set.updated_at, later);

        let ids: Vec<_> = set.items().map(|item| item.id).collect();
        assert_eq!(ids, vec!["c1", "c3", "c4", "q1"]);
    }

    #[test]
    fn test_add_flashcard_to_empty_set() {
        let mut set = StudySet::new("set-2", "Empty", SourceType::Text, now());
        assert_eq!(set.add_flashcard("front", "back", now()).id, "c1");
        assert_eq!(set.add_flashcard("front", "back", now()).id, "c2");
        assert_eq!(set.flashcards[1].position, 1);
    }

    #[test]
    fn test_source_type_names() {
        assert_eq!(SourceType::parse("youtube"), Some(SourceType::Youtube));
        assert_eq!(SourceType::parse(SourceType::Image.as_str()), Some(SourceType::Image));
        assert_eq!(SourceType::parse("docx"), None);
    }

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_value(create_test_set()).unwrap();
        assert_eq!(json["sourceType"], "PDF");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("subject").is_none());
    }
}
