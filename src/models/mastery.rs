//! Mastery tiers derived from the consecutive-success count, and per-set tallies of them.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasteryLevel {
    #[default]
    Unfamiliar,
    Learning,
    Familiar,
    Mastered,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 4] = [
        Self::Unfamiliar,
        Self::Learning,
        Self::Familiar,
        Self::Mastered,
    ];

    /// Tier for a given number of consecutive successful recalls.
    /// 0 → unfamiliar, 1 → learning, 2-3 → familiar, 4+ → mastered.
    pub fn from_repetitions(repetitions: u32) -> Self {
        match repetitions {
            0 => Self::Unfamiliar,
            1 => Self::Learning,
            2 | 3 => Self::Familiar,
            _ => Self::Mastered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unfamiliar => "UNFAMILIAR",
            Self::Learning => "LEARNING",
            Self::Familiar => "FAMILIAR",
            Self::Mastered => "MASTERED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UNFAMILIAR" => Some(Self::Unfamiliar),
            "LEARNING" => Some(Self::Learning),
            "FAMILIAR" => Some(Self::Familiar),
            "MASTERED" => Some(Self::Mastered),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unfamiliar => "Unfamiliar",
            Self::Learning => "Learning",
            Self::Familiar => "Familiar",
            Self::Mastered => "Mastered",
        }
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of items in each mastery tier (the progress bar of a study set).
/// Serialized by `study-review summary --json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MasteryBreakdown {
    pub unfamiliar: usize,
    pub learning: usize,
    pub familiar: usize,
    pub mastered: usize,
}

impl MasteryBreakdown {
    pub fn record(&mut self, level: MasteryLevel) {
        match level {
            MasteryLevel::Unfamiliar => self.unfamiliar += 1,
            MasteryLevel::Learning => self.learning += 1,
            MasteryLevel::Familiar => self.familiar += 1,
            MasteryLevel::Mastered => self.mastered += 1,
        }
    }

    pub fn count(&self, level: MasteryLevel) -> usize {
        match level {
            MasteryLevel::Unfamiliar => self.unfamiliar,
            MasteryLevel::Learning => self.learning,
            MasteryLevel::Familiar => self.familiar,
            MasteryLevel::Mastered => self.mastered,
        }
    }

    pub fn total(&self) -> usize {
        self.unfamiliar + self.learning + self.familiar + self.mastered
    }

    /// Share of mastered items, 0-100. An empty set reports 0.
    pub fn mastered_percent(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.mastered as f64 * 100.0 / total as f64,
        }
    }
}

impl FromIterator<MasteryLevel> for MasteryBreakdown {
    fn from_iter<I: IntoIterator<Item = MasteryLevel>>(iter: I) -> Self {
        let mut breakdown = Self::default();
        for level in iter {
            breakdown.record(level);
        }
        breakdown
    }
}
