//! Storage entity traits and types

use std::fmt::Debug;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Opaque identifier assigned by the store when an entity is created
///
/// An empty identifier means the entity has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when no identifier has been assigned
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// Name of the collection holding this entity type
    const COLLECTION: &'static str;

    /// Returns the entity's identifier
    fn id(&self) -> &EntityId;

    /// Replaces the entity's identifier
    fn set_id(&mut self, id: EntityId);

    /// Consumes the entity and returns it with the given identifier
    fn with_id(mut self, id: EntityId) -> Self {
        self.set_id(id);
        self
    }
}
