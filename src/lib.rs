pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod validation;

pub use error::{Result, ReviewError};
pub use models::sm2::{evaluate, mastery_of, next_review_timestamp, rating_from_action};
pub use models::{
    Evaluation, Flashcard, MasteryBreakdown, MasteryLevel, QuizQuestion, ReviewAction,
    ReviewSession, ReviewState, StudySet,
};
