//! Trick entity and related types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{TrickValidationError, validate_trick_name};
use crate::domain::storage::{EntityId, StorageEntity};

/// How hard a trick is to land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = TrickValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(TrickValidationError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Trick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trick {
    #[serde(default)]
    id: EntityId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl Trick {
    /// Create a new, not yet persisted trick
    pub fn new(name: impl Into<String>) -> Result<Self, TrickValidationError> {
        let name = name.into();
        validate_trick_name(&name)?;

        Ok(Self {
            id: EntityId::default(),
            name,
            description: None,
            difficulty: None,
            category: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl StorageEntity for Trick {
    const COLLECTION: &'static str = "tricks";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
