//! Error type shared by the study-set helpers, the JSON snapshot and config loading.
//!
//! The scheduler in [`crate::models::sm2`] never fails; everything here belongs
//! to the boundary code that feeds it.

/// Errors raised around the scheduler (validation, lookup, I/O).
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Rating outside the 0-5 quality scale
    #[error("Rating {0} is outside the 0-5 quality scale")]
    RatingOutOfRange(i32),
    /// Stored ease factor is NaN or infinite
    #[error("Ease factor must be finite, got {0}")]
    NonFiniteEaseFactor(f64),
    /// No flashcard or quiz question with this id
    #[error("Unknown study item: {0}")]
    UnknownItem(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed config.toml
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ReviewError>;
