//! Repository infrastructure - process-wide repository registry

mod manager;

pub use manager::RepositoryManager;
