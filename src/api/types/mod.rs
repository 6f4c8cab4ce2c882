//! API request, response and error types

pub mod error;
pub mod json;
pub mod representation;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use representation::{
    ListMoviesResponse, ListTricksResponse, MovieRepresentation, TrickRepresentation,
};
