//! Infrastructure layer - Storage backends, repository registry and logging

pub mod logging;
pub mod repository;
pub mod storage;
