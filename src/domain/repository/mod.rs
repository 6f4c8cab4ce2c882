//! Repository domain - per-entity-type facade over a storage strategy

mod facade;
mod observer;

pub use facade::Repository;
pub use observer::{
    NoopObserver, OperationEvent, RepositoryObserver, RepositoryOperation, TracingObserver,
};

#[cfg(test)]
pub use observer::recording;
