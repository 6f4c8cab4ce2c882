//! Application state shared by all handlers

use std::sync::Arc;

use crate::infrastructure::repository::RepositoryManager;

/// Application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub repositories: Arc<RepositoryManager>,
}

impl AppState {
    pub fn new(repositories: Arc<RepositoryManager>) -> Self {
        Self { repositories }
    }
}
