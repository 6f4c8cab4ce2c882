//! Trick domain module

mod entity;
mod validation;

pub use entity::{Difficulty, Trick};
pub use validation::{TrickValidationError, validate_trick_name};
