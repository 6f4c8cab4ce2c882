//! Domain layer - Entities, storage contract and repositories

pub mod error;
pub mod movie;
pub mod repository;
pub mod storage;
pub mod trick;

pub use error::DomainError;
pub use movie::Movie;
pub use repository::{Repository, RepositoryObserver};
pub use storage::{EntityId, Storage, StorageEntity};
pub use trick::{Difficulty, Trick};
