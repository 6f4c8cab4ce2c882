//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{EntityId, Storage, StorageEntity};

/// Thread-safe in-memory storage implementation
///
/// Identifiers are random UUIDs. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities, keyed by their current id
    #[cfg(test)]
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.id().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let id = EntityId::generate();
        let entity = entity.with_id(id.clone());

        let mut entities = self.entities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        entities.insert(id.into(), entity.clone());
        Ok(entity)
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.values().cloned().collect())
    }

    async fn get(&self, id: &EntityId) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.get(id.as_str()).cloned())
    }

    async fn update(&self, id: &EntityId, entity: E) -> Result<E, DomainError> {
        if id.is_unassigned() {
            return Err(DomainError::invalid_id("Identifier must not be empty"));
        }

        let entity = entity.with_id(id.clone());

        let mut entities = self.entities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        entities.insert(id.as_str().to_string(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: &EntityId) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(entities.remove(id.as_str()).is_some())
    }

    async fn exists(&self, id: &EntityId) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.contains_key(id.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::domain::movie::Movie;

    fn movie(title: &str) -> Movie {
        Movie::new(title).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();

        let created = storage.create(movie("Inception")).await.unwrap();
        assert!(!created.id().is_unassigned());
        assert_eq!(created.title(), "Inception");

        let found = storage.get(created.id()).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.id(), created.id());
    }

    #[tokio::test]
    async fn test_create_overwrites_caller_id() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();
        let supplied = movie("Inception").with_id(EntityId::new("caller-chosen"));

        let created = storage.create(supplied).await.unwrap();

        assert_ne!(created.id().as_str(), "caller-chosen");
        assert!(storage.get(&EntityId::new("caller-chosen")).await.unwrap().is_none());
        assert!(storage.get(created.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();

        let result = storage.get(&EntityId::new("nonexistent-id")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_existing() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();
        let created = storage.create(movie("Original")).await.unwrap();

        let updated = storage
            .update(created.id(), movie("Updated"))
            .await
            .unwrap();

        assert_eq!(updated.id(), created.id());
        let found = storage.get(created.id()).await.unwrap().unwrap();
        assert_eq!(found.title(), "Updated");
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_inserts_when_absent() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();
        let id = EntityId::new("abc");

        let updated = storage.update(&id, movie("X")).await.unwrap();
        assert_eq!(updated.id().as_str(), "abc");

        let found = storage.get(&id).await.unwrap().unwrap();
        assert_eq!(found.title(), "X");
    }

    #[tokio::test]
    async fn test_update_sets_id_regardless_of_entity_id() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();
        let stale = movie("X").with_id(EntityId::new("other"));

        let updated = storage.update(&EntityId::new("abc"), stale).await.unwrap();

        assert_eq!(updated.id().as_str(), "abc");
        assert!(!storage.exists(&EntityId::new("other")).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_with_empty_id_is_rejected() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();

        let result = storage.update(&EntityId::new(""), movie("X")).await;

        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();
        let created = storage.create(movie("Inception")).await.unwrap();

        assert!(storage.delete(created.id()).await.unwrap());
        assert!(!storage.delete(created.id()).await.unwrap());
        assert!(!storage.exists(created.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();

        let deleted = storage.delete(&EntityId::new("nonexistent-id")).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_list_returns_stored_ids() {
        let storage: InMemoryStorage<Movie> = InMemoryStorage::new();

        storage.create(movie("A")).await.unwrap();
        storage.create(movie("B")).await.unwrap();
        storage.create(movie("C")).await.unwrap();

        let list = storage.list().await.unwrap();
        assert_eq!(list.len(), 3);

        for entity in &list {
            let stored = storage.get(entity.id()).await.unwrap().unwrap();
            assert_eq!(&stored, entity);
        }
    }

    #[tokio::test]
    async fn test_with_entities() {
        let entities = vec![
            movie("A").with_id(EntityId::new("1")),
            movie("B").with_id(EntityId::new("2")),
        ];
        let storage: InMemoryStorage<Movie> = InMemoryStorage::with_entities(entities);

        assert_eq!(storage.count().await.unwrap(), 2);
        assert_eq!(
            storage.get(&EntityId::new("2")).await.unwrap().unwrap().title(),
            "B"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let storage = Arc::new(InMemoryStorage::<Movie>::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move { storage.create(movie(&format!("Movie {i}"))).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let created = handle.await.unwrap().unwrap();
            ids.insert(created.id().clone());
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(storage.count().await.unwrap(), 64);
    }
}
