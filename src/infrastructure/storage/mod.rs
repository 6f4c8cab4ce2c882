//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod mongo;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use mongo::{
    MongoConfig, MongoCredential, MongoStorage, connect_client, document_to_entity,
    entity_to_document, parse_object_id,
};
