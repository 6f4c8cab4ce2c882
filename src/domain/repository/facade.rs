//! Repository bound to a single storage strategy

use std::future::Future;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::storage::{EntityId, Storage, StorageEntity};

use super::observer::{NoopObserver, OperationEvent, RepositoryObserver, RepositoryOperation};

/// Per-entity-type facade over one storage strategy
///
/// Every call is forwarded to the bound storage unchanged; the observer sees
/// a start and a finish event around it.
#[derive(Debug)]
pub struct Repository<E>
where
    E: StorageEntity + 'static,
{
    storage: Arc<dyn Storage<E>>,
    observer: Arc<dyn RepositoryObserver>,
}

impl<E> Repository<E>
where
    E: StorageEntity + 'static,
{
    /// Create a repository without observation
    pub fn new(storage: Arc<dyn Storage<E>>) -> Self {
        Self::with_observer(storage, Arc::new(NoopObserver))
    }

    pub fn with_observer(
        storage: Arc<dyn Storage<E>>,
        observer: Arc<dyn RepositoryObserver>,
    ) -> Self {
        Self { storage, observer }
    }

    pub async fn create(&self, entity: E) -> Result<E, DomainError> {
        self.observe(RepositoryOperation::Create, None, self.storage.create(entity))
            .await
    }

    pub async fn list(&self) -> Result<Vec<E>, DomainError> {
        self.observe(RepositoryOperation::List, None, self.storage.list())
            .await
    }

    /// Retrieve an entity, `None` when the id is unknown
    pub async fn retrieve(&self, id: &EntityId) -> Result<Option<E>, DomainError> {
        self.observe(RepositoryOperation::Retrieve, Some(id), self.storage.get(id))
            .await
    }

    /// Store `entity` under `id`, whatever identifier it carried before
    pub async fn update(&self, id: &EntityId, entity: E) -> Result<E, DomainError> {
        self.observe(
            RepositoryOperation::Update,
            Some(id),
            self.storage.update(id, entity),
        )
        .await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<bool, DomainError> {
        self.observe(RepositoryOperation::Delete, Some(id), self.storage.delete(id))
            .await
    }

    pub async fn exists(&self, id: &EntityId) -> Result<bool, DomainError> {
        self.observe(RepositoryOperation::Exists, Some(id), self.storage.exists(id))
            .await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.observe(RepositoryOperation::Count, None, self.storage.count())
            .await
    }

    async fn observe<T, F>(
        &self,
        operation: RepositoryOperation,
        id: Option<&EntityId>,
        call: F,
    ) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        let event = OperationEvent {
            collection: E::COLLECTION,
            operation,
            id,
        };

        self.observer.on_start(&event);
        let result = call.await;
        self.observer.on_finish(&event, result.as_ref().err());

        result
    }
}
