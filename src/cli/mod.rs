//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `init` - Create and seed the data file

pub mod args;

pub use args::{Cli, Commands};
