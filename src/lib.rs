//! Reel Tricks API
//!
//! A CRUD service for movies and tricks with:
//! - Pluggable storage (in-memory or MongoDB)
//! - A generic repository facade over each storage
//! - A repository manager handing out one repository per entity type

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::repository::TracingObserver;
use infrastructure::repository::RepositoryManager;
use tracing::info;

/// Create the application state, connecting to storage eagerly
///
/// Fails if the configured backend cannot be reached.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.to_storage_config()?;
    info!(backend = %storage_config.storage_type(), "Initializing repositories");

    let manager = RepositoryManager::with_observer(storage_config, Arc::new(TracingObserver));
    manager.initialize().await?;

    Ok(AppState::new(Arc::new(manager)))
}
