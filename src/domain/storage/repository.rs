//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{EntityId, StorageEntity};

/// Storage strategy for CRUD operations on one entity type
///
/// Implementations own identity assignment: `create` always assigns a fresh
/// identifier and `update` always stores the entity under the given one.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Persists a new entity under a freshly generated identifier
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Retrieves an entity by its identifier, `None` if absent
    async fn get(&self, id: &EntityId) -> Result<Option<E>, DomainError>;

    /// Stores the entity under `id`, inserting it if absent
    async fn update(&self, id: &EntityId, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its identifier, returns true if one was removed
    async fn delete(&self, id: &EntityId) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its identifier
    async fn exists(&self, id: &EntityId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
