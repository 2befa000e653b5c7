//! User Admin API - admin user management backend
//!
//! A small admin web application backend: credential and OAuth-style
//! authentication issuing JWT session tokens, a JSON-file-backed user
//! store, and CRUD REST endpoints for managing user records.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and validation rules
//! - **services**: Application use cases and business logic
//! - **infra**: Persistence (document storage and repository)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Create and seed the data file
//! cargo run -- init
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
