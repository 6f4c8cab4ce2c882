//! Observation hooks for repository operations

use std::fmt::Debug;

use tracing::{debug, warn};

use crate::domain::DomainError;
use crate::domain::storage::EntityId;

/// Repository operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    Create,
    List,
    Retrieve,
    Update,
    Delete,
    Exists,
    Count,
}

impl std::fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::List => write!(f, "list"),
            Self::Retrieve => write!(f, "retrieve"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Exists => write!(f, "exists"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// A single repository call as seen by an observer
#[derive(Debug, Clone, Copy)]
pub struct OperationEvent<'a> {
    /// Collection of the entity type
    pub collection: &'static str,
    pub operation: RepositoryOperation,
    /// Target identifier, if the operation has one
    pub id: Option<&'a EntityId>,
}

/// Receives start and finish events for every repository call
pub trait RepositoryObserver: Send + Sync + Debug {
    fn on_start(&self, _event: &OperationEvent<'_>) {}

    /// Called once the call has completed; `error` is set when it failed
    fn on_finish(&self, _event: &OperationEvent<'_>, _error: Option<&DomainError>) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RepositoryObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RepositoryObserver for TracingObserver {
    fn on_start(&self, event: &OperationEvent<'_>) {
        debug!(
            collection = event.collection,
            operation = %event.operation,
            id = event.id.map(EntityId::as_str),
            "Repository operation started"
        );
    }

    fn on_finish(&self, event: &OperationEvent<'_>, error: Option<&DomainError>) {
        match error {
            None => debug!(
                collection = event.collection,
                operation = %event.operation,
                id = event.id.map(EntityId::as_str),
                "Repository operation finished"
            ),
            Some(error) => warn!(
                collection = event.collection,
                operation = %event.operation,
                id = event.id.map(EntityId::as_str),
                kind = error.kind(),
                error = %error,
                "Repository operation failed"
            ),
        }
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Observer that records every event for assertions
    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RepositoryObserver for RecordingObserver {
        fn on_start(&self, event: &OperationEvent<'_>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{}:{}", event.collection, event.operation));
        }

        fn on_finish(&self, event: &OperationEvent<'_>, error: Option<&DomainError>) {
            let status = error.map(DomainError::kind).unwrap_or("ok");
            self.events.lock().unwrap().push(format!(
                "finish:{}:{}:{}",
                event.collection, event.operation, status
            ));
        }
    }
}
