//! Input checks for callers that take ratings from outside (CLI, forms).
//!
//! The scheduler accepts any integer rating; these checks are opt-in.

use crate::error::{Result, ReviewError};
use crate::models::sm2::MAX_RATING;

pub fn validate_rating(rating: i32) -> Result<i32> {
    if (0..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ReviewError::RatingOutOfRange(rating))
    }
}

pub fn validate_ease_factor(ease_factor: f64) -> Result<f64> {
    if ease_factor.is_finite() {
        Ok(ease_factor)
    } else {
        Err(ReviewError::NonFiniteEaseFactor(ease_factor))
    }
}
