//! Registry handing out one shared repository per entity type

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::DomainError;
use crate::domain::movie::Movie;
use crate::domain::repository::{NoopObserver, Repository, RepositoryObserver};
use crate::domain::storage::StorageEntity;
use crate::domain::trick::Trick;
use crate::infrastructure::storage::{StorageConfig, StorageFactory};

/// Owns the repositories for every entity type
///
/// Repositories are built lazily on first access and reused for the lifetime
/// of the manager. Concurrent first accesses wait on a single construction.
#[derive(Debug)]
pub struct RepositoryManager {
    config: StorageConfig,
    observer: Arc<dyn RepositoryObserver>,
    movies: OnceCell<Arc<Repository<Movie>>>,
    tricks: OnceCell<Arc<Repository<Trick>>>,
}

impl RepositoryManager {
    pub fn new(config: StorageConfig) -> Self {
        Self::with_observer(config, Arc::new(NoopObserver))
    }

    pub fn with_observer(config: StorageConfig, observer: Arc<dyn RepositoryObserver>) -> Self {
        Self {
            config,
            observer,
            movies: OnceCell::new(),
            tricks: OnceCell::new(),
        }
    }

    /// Manager backed by in-memory storage
    pub fn in_memory() -> Self {
        Self::new(StorageConfig::in_memory())
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Builds every repository up front so that storage failures surface at startup
    pub async fn initialize(&self) -> Result<(), DomainError> {
        self.movie_repository().await?;
        self.trick_repository().await?;

        info!(
            backend = %self.config.storage_type(),
            "Repositories initialized"
        );

        Ok(())
    }

    pub async fn movie_repository(&self) -> Result<Arc<Repository<Movie>>, DomainError> {
        self.repository(&self.movies).await
    }

    pub async fn trick_repository(&self) -> Result<Arc<Repository<Trick>>, DomainError> {
        self.repository(&self.tricks).await
    }

    async fn repository<E>(
        &self,
        cell: &OnceCell<Arc<Repository<E>>>,
    ) -> Result<Arc<Repository<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        cell.get_or_try_init(|| async {
            let storage = StorageFactory::create::<E>(&self.config).await?;

            info!(
                collection = E::COLLECTION,
                backend = %self.config.storage_type(),
                "Created repository"
            );

            Ok::<_, DomainError>(Arc::new(Repository::with_observer(
                storage,
                self.observer.clone(),
            )))
        })
        .await
        .cloned()
    }
}
