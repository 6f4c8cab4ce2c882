//! Storage domain - Generic storage abstraction layer

mod entity;
mod repository;

pub use entity::{EntityId, StorageEntity};
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
