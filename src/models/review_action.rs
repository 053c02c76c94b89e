//! Coarse rating buttons shown under a flashcard.
use super::sm2;

/// What the learner pressed after seeing the answer.
///
/// Unknown tags land in `Unrecognized`, which scores as a neutral 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewAction {
    StillLearning,
    GettingThere,
    Almost,
    Mastered,
    Unrecognized,
}

impl ReviewAction {
    /// The four buttons in display order (keys 1-4).
    pub const BUTTONS: [ReviewAction; 4] = [
        Self::StillLearning,
        Self::GettingThere,
        Self::Almost,
        Self::Mastered,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "still_learning" => Self::StillLearning,
            "getting_there" => Self::GettingThere,
            "almost" => Self::Almost,
            "mastered" => Self::Mastered,
            _ => Self::Unrecognized,
        }
    }

    /// Keyboard shortcut: '1'..='4' pick a button, anything else is ignored.
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)?;
        Self::BUTTONS.get(index as usize).copied()
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::StillLearning => "still_learning",
            Self::GettingThere => "getting_there",
            Self::Almost => "almost",
            Self::Mastered => "mastered",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StillLearning => "Still Learning",
            Self::GettingThere => "Getting There",
            Self::Almost => "Almost",
            Self::Mastered => "Mastered!",
            Self::Unrecognized => "Unrated",
        }
    }

    pub fn rating(&self) -> i32 {
        sm2::rating_from_action(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip_for_buttons() {
        for action in ReviewAction::BUTTONS {
            assert_eq!(ReviewAction::from_tag(action.tag()), action);
        }
    }

    #[test]
    fn test_unknown_tag_is_neutral() {
        let action = ReviewAction::from_tag("unknown_tag");
        assert_eq!(action, ReviewAction::Unrecognized);
        assert_eq!(action.rating(), 3);
        // Tags are case-sensitive
        assert_eq!(ReviewAction::from_tag("Mastered"), ReviewAction::Unrecognized);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        assert_eq!(ReviewAction::from_key('1'), Some(ReviewAction::StillLearning));
        assert_eq!(ReviewAction::from_key('2'), Some(ReviewAction::GettingThere));
        assert_eq!(ReviewAction::from_key('3'), Some(ReviewAction::Almost));
        assert_eq!(ReviewAction::from_key('4'), Some(ReviewAction::Mastered));
        assert_eq!(ReviewAction::from_key('0'), None);
        assert_eq!(ReviewAction::from_key('5'), None);
        assert_eq!(ReviewAction::from_key('x'), None);
    }
}
