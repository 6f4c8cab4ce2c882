//! API layer - HTTP endpoints for movies and tricks

pub mod health;
pub mod movies;
pub mod router;
pub mod state;
pub mod tricks;
pub mod types;

pub use router::create_router;
pub use state::AppState;
