//! Movie entity

use serde::{Deserialize, Serialize};

use super::validation::{
    MovieValidationError, validate_movie_rating, validate_movie_title, validate_movie_year,
};
use crate::domain::storage::{EntityId, StorageEntity};

/// Movie entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Store-assigned identifier
    #[serde(default)]
    id: EntityId,
    /// Title
    title: String,
    /// Release year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    /// Director name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    director: Option<String>,
    /// Rating on a 0-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,
    /// Genres
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    genres: Vec<String>,
}

impl Movie {
    /// Create a new, not yet persisted movie
    pub fn new(title: impl Into<String>) -> Result<Self, MovieValidationError> {
        let title = title.into();
        validate_movie_title(&title)?;

        Ok(Self {
            id: EntityId::default(),
            title,
            year: None,
            director: None,
            rating: None,
            genres: Vec::new(),
        })
    }

    pub fn with_year(mut self, year: i32) -> Result<Self, MovieValidationError> {
        validate_movie_year(Some(year))?;
        self.year = Some(year);
        Ok(self)
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Result<Self, MovieValidationError> {
        validate_movie_rating(Some(rating))?;
        self.rating = Some(rating);
        Ok(self)
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    // Getters

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

impl StorageEntity for Movie {
    const COLLECTION: &'static str = "movies";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_creation() {
        let movie = Movie::new("Inception").unwrap();

        assert_eq!(movie.title(), "Inception");
        assert!(movie.id().is_unassigned());
        assert!(movie.year().is_none());
        assert!(movie.genres().is_empty());
    }

    #[test]
    fn test_movie_builder() {
        let movie = Movie::new("Inception")
            .unwrap()
            .with_year(2010)
            .unwrap()
            .with_director("Christopher Nolan")
            .with_rating(8.8)
            .unwrap()
            .with_genres(vec!["sci-fi".to_string(), "thriller".to_string()]);

        assert_eq!(movie.year(), Some(2010));
        assert_eq!(movie.director(), Some("Christopher Nolan"));
        assert_eq!(movie.rating(), Some(8.8));
        assert_eq!(movie.genres().len(), 2);
    }

    #[test]
    fn test_movie_invalid_title() {
        assert!(Movie::new("").is_err());
    }

    #[test]
    fn test_movie_invalid_rating() {
        assert!(Movie::new("Inception").unwrap().with_rating(11.0).is_err());
    }

    #[test]
    fn test_movie_deserializes_without_id() {
        let movie: Movie = serde_json::from_str(r#"{"title":"Inception","year":2010}"#).unwrap();

        assert!(movie.id().is_unassigned());
        assert_eq!(movie.year(), Some(2010));
    }

    #[test]
    fn test_movie_skips_empty_optional_fields() {
        let movie = Movie::new("Inception").unwrap();
        let json = serde_json::to_value(&movie).unwrap();

        assert!(json.get("director").is_none());
        assert!(json.get("genres").is_none());
    }
}
