//! Review session management for spaced repetition practice.
//! Handles multi-round review of due items with SM-2 scheduling on every rating.

use super::sm2::Evaluation;
use super::{ReviewAction, SessionCard, StudySet};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Manages a review session with multiple rounds.
/// Items that fail (rating < 3) are repeated in subsequent rounds.
pub struct ReviewSession {
    pub study_set_title: String,
    pub cards: Vec<SessionCard>,
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub show_answer: bool,
    pub round_number: usize,
}

impl ReviewSession {
    /// Creates a session from the items of `study_set` that are due at `now`.
    pub fn new_from_due(study_set: &StudySet, now: DateTime<Utc>) -> Self {
        let cards: Vec<_> = study_set
            .due_items(now)
            .into_iter()
            .map(|item| SessionCard::new(item, now))
            .collect();

        let indices: Vec<usize> = (0..cards.len()).collect();

        tracing::debug!(
            study_set = %study_set.title,
            due = cards.len(),
            "Starting review session"
        );

        Self {
            study_set_title: study_set.title.clone(),
            cards,
            current_round_cards: indices,
            current_index: 0,
            show_answer: false,
            round_number: 1,
        }
    }

    pub fn current_card(&self) -> Option<&SessionCard> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.cards.get(idx))
    }

    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }

    pub fn next_card(&mut self) {
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
            self.show_answer = false;
        } else {
            // End of round
            self.start_next_round();
        }
    }

    /// Starts a new round with the items that failed this one.
    /// If none remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| self.cards.get(idx).is_some_and(|card| !card.passed))
            .collect();

        if !failed_indices.is_empty() {
            self.current_round_cards = failed_indices;
            self.current_index = 0;
            self.show_answer = false;
            self.round_number += 1;
        }
    }

    pub fn rate_current(&mut self, action: ReviewAction, now: DateTime<Utc>) -> Option<Evaluation> {
        self.rate_current_with(action.rating(), now)
    }

    /// Rates the current item with a raw 0-5 quality and reschedules it.
    /// Returns `None` when there is no current item.
    pub fn rate_current_with(&mut self, rating: i32, now: DateTime<Utc>) -> Option<Evaluation> {
        let &idx = self.current_round_cards.get(self.current_index)?;
        let card = self.cards.get_mut(idx)?;

        let (next, evaluation) = card.state.apply_rating(rating, now);
        card.record_rating(next, evaluation.passed(), now);

        tracing::debug!(
            item = %card.item_id,
            rating,
            round = self.round_number,
            interval_days = evaluation.interval_days,
            mastery = %evaluation.mastery,
            "Rated session card"
        );
        Some(evaluation)
    }

    pub fn learned_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| self.cards.get(idx).is_some_and(|card| card.passed))
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    /// True when nothing was due or every item of the current round passed.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.learned_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }

    /// Writes the state of every rated item back into the study set.
    pub fn apply_to(&self, study_set: &mut StudySet) -> Result<()> {
        for card in self.cards.iter().filter(|card| card.last_rated_at.is_some()) {
            study_set.set_review(&card.item_id, card.state.clone())?;
        }
        if let Some(latest) = self.cards.iter().filter_map(|card| card.last_rated_at).max() {
            study_set.updated_at = latest;
        }
        Ok(())
    }
}
