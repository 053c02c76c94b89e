pub mod flashcard;
pub mod mastery;
pub mod quiz_question;
pub mod review_action;
pub mod review_session;
pub mod review_state;
pub mod session_card;
pub mod sm2;
pub mod study_set;

pub use flashcard::Flashcard;
pub use mastery::{MasteryBreakdown, MasteryLevel};
pub use quiz_question::{QuestionKind, QuizQuestion};
pub use review_action::ReviewAction;
pub use review_session::ReviewSession;
pub use review_state::ReviewState;
pub use session_card::SessionCard;
pub use sm2::Evaluation;
pub use study_set::{SourceType, StudyItem, StudySet};
