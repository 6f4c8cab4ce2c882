//! Movie domain module

mod entity;
mod validation;

pub use entity::Movie;
pub use validation::{
    MovieValidationError, validate_movie_rating, validate_movie_title, validate_movie_year,
};
