//! CLI module for the movie and trick service
//!
//! Provides subcommands for running the service:
//! - `serve`: HTTP API backed by the configured storage

pub mod serve;

use clap::{Parser, Subcommand};

/// Reel Tricks - CRUD service for movies and tricks
#[derive(Parser)]
#[command(name = "reel-tricks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
