//! Movie validation

use thiserror::Error;

/// Errors that can occur during movie validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MovieValidationError {
    #[error("Movie title cannot be empty")]
    EmptyTitle,

    #[error("Movie title cannot exceed {0} characters")]
    TitleTooLong(usize),

    #[error("Movie year must be between 1878 and 2100")]
    YearOutOfRange,

    #[error("Movie rating must be between 0 and 10")]
    RatingOutOfRange,
}

const MAX_TITLE_LENGTH: usize = 200;
const MIN_YEAR: i32 = 1878;
const MAX_YEAR: i32 = 2100;
const MAX_RATING: f64 = 10.0;

/// Validate a movie title
pub fn validate_movie_title(title: &str) -> Result<(), MovieValidationError> {
    if title.trim().is_empty() {
        return Err(MovieValidationError::EmptyTitle);
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(MovieValidationError::TitleTooLong(MAX_TITLE_LENGTH));
    }

    Ok(())
}

/// Validate an optional release year
pub fn validate_movie_year(year: Option<i32>) -> Result<(), MovieValidationError> {
    match year {
        Some(year) if !(MIN_YEAR..=MAX_YEAR).contains(&year) => {
            Err(MovieValidationError::YearOutOfRange)
        }
        _ => Ok(()),
    }
}

/// Validate an optional rating
pub fn validate_movie_rating(rating: Option<f64>) -> Result<(), MovieValidationError> {
    match rating {
        Some(rating) if !(0.0..=MAX_RATING).contains(&rating) => {
            Err(MovieValidationError::RatingOutOfRange)
        }
        _ => Ok(()),
    }
}
