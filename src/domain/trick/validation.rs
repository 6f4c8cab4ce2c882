//! Trick validation

use thiserror::Error;

/// Errors that can occur during trick validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrickValidationError {
    #[error("Trick name cannot be empty")]
    EmptyName,

    #[error("Trick name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Unknown trick difficulty '{0}'")]
    UnknownDifficulty(String),
}

const MAX_TRICK_NAME_LENGTH: usize = 100;

/// Validate a trick name
pub fn validate_trick_name(name: &str) -> Result<(), TrickValidationError> {
    if name.trim().is_empty() {
        return Err(TrickValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TRICK_NAME_LENGTH {
        return Err(TrickValidationError::NameTooLong(MAX_TRICK_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_trick_name() {
        assert!(validate_trick_name("Kickflip").is_ok());
        assert!(validate_trick_name("360 flip").is_ok());
    }

    #[test]
    fn test_empty_trick_name() {
        assert_eq!(validate_trick_name(""), Err(TrickValidationError::EmptyName));
        assert_eq!(validate_trick_name("  "), Err(TrickValidationError::EmptyName));
    }

    #[test]
    fn test_trick_name_too_long() {
        let name = "x".repeat(101);
        assert_eq!(
            validate_trick_name(&name),
            Err(TrickValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_trick_name_length_counts_characters() {
        let name = "ñ".repeat(100);
        assert!(validate_trick_name(&name).is_ok());
    }
}
