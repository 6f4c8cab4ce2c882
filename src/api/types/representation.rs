//! Wire representations of movies and tricks

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::movie::Movie;
use crate::domain::storage::StorageEntity;
use crate::domain::trick::{Difficulty, Trick};

/// Movie as sent and received over HTTP
///
/// An incoming `id` is ignored; identifiers come from the path or the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl From<&Movie> for MovieRepresentation {
    fn from(movie: &Movie) -> Self {
        Self {
            id: Some(movie.id().to_string()),
            title: movie.title().to_string(),
            year: movie.year(),
            director: movie.director().map(String::from),
            rating: movie.rating(),
            genres: movie.genres().to_vec(),
        }
    }
}

impl MovieRepresentation {
    /// Validates the representation and builds an unpersisted movie
    pub fn into_movie(self) -> Result<Movie, DomainError> {
        let mut movie = Movie::new(self.title).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(year) = self.year {
            movie = movie
                .with_year(year)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(rating) = self.rating {
            movie = movie
                .with_rating(rating)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(director) = self.director {
            movie = movie.with_director(director);
        }

        Ok(movie.with_genres(self.genres))
    }
}

/// List movies response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMoviesResponse {
    pub movies: Vec<MovieRepresentation>,
    pub total: usize,
}

/// Trick as sent and received over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrickRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<&Trick> for TrickRepresentation {
    fn from(trick: &Trick) -> Self {
        Self {
            id: Some(trick.id().to_string()),
            name: trick.name().to_string(),
            description: trick.description().map(String::from),
            difficulty: trick.difficulty().map(|d| d.to_string()),
            category: trick.category().map(String::from),
        }
    }
}

impl TrickRepresentation {
    /// Validates the representation and builds an unpersisted trick
    pub fn into_trick(self) -> Result<Trick, DomainError> {
        let mut trick = Trick::new(self.name).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(description) = self.description {
            trick = trick.with_description(description);
        }

        if let Some(difficulty) = self.difficulty {
            let difficulty = difficulty
                .parse::<Difficulty>()
                .map_err(|e| DomainError::validation(e.to_string()))?;
            trick = trick.with_difficulty(difficulty);
        }

        if let Some(category) = self.category {
            trick = trick.with_category(category);
        }

        Ok(trick)
    }
}

/// List tricks response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTricksResponse {
    pub tricks: Vec<TrickRepresentation>,
    pub total: usize,
}
