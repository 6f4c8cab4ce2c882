//! Storage factory for runtime storage selection

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::storage::{Storage, StorageEntity};

use super::in_memory::InMemoryStorage;
use super::mongo::{MongoConfig, MongoStorage};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage
    InMemory,
    /// MongoDB document storage
    Mongo,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "mongo" | "mongodb" | "document" => Ok(Self::Mongo),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => write!(f, "memory"),
            Self::Mongo => write!(f, "mongo"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// MongoDB storage configuration
    Mongo(MongoConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a MongoDB storage configuration
    pub fn mongo(config: MongoConfig) -> Self {
        Self::Mongo(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Mongo(_) => StorageType::Mongo,
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a storage instance for `E` based on the configuration
    ///
    /// Fails with `ConnectionUnavailable` if a MongoDB backend cannot be reached.
    pub async fn create<E>(config: &StorageConfig) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match config {
            StorageConfig::InMemory => {
                let storage: Arc<dyn Storage<E>> = Self::create_in_memory::<E>();
                Ok(storage)
            }
            StorageConfig::Mongo(mongo_config) => {
                let storage = MongoStorage::<E>::connect(mongo_config, E::COLLECTION).await?;
                Ok(Arc::new(storage))
            }
        }
    }

    /// Creates an in-memory storage
    pub fn create_in_memory<E>() -> Arc<InMemoryStorage<E>>
    where
        E: StorageEntity,
    {
        Arc::new(InMemoryStorage::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::Movie;
    use crate::domain::storage::EntityId;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("in-memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("mongo".parse::<StorageType>().unwrap(), StorageType::Mongo);
        assert_eq!("MongoDB".parse::<StorageType>().unwrap(), StorageType::Mongo);
        assert!(matches!(
            "postgres".parse::<StorageType>(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_storage_type_display_parses_back() {
        for storage_type in [StorageType::InMemory, StorageType::Mongo] {
            assert_eq!(
                storage_type.to_string().parse::<StorageType>().unwrap(),
                storage_type
            );
        }
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::in_memory().storage_type(), StorageType::InMemory);
        assert_eq!(
            StorageConfig::mongo(MongoConfig::default()).storage_type(),
            StorageType::Mongo
        );
    }

    #[tokio::test]
    async fn test_create_in_memory_storage() {
        let storage = StorageFactory::create::<Movie>(&StorageConfig::in_memory())
            .await
            .unwrap();

        let created = storage.create(Movie::new("Inception").unwrap()).await.unwrap();
        assert!(storage.exists(created.id()).await.unwrap());
        assert!(!storage.exists(&EntityId::new("other")).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_mongo_unreachable_fails() {
        let config = StorageConfig::mongo(
            MongoConfig::default()
                .with_host("mongo.invalid")
                .with_connect_timeout(1),
        );

        let result = StorageFactory::create::<Movie>(&config).await;
        assert!(matches!(
            result,
            Err(DomainError::ConnectionUnavailable { .. })
        ));
    }
}
