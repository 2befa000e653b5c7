//! Infrastructure layer - Persistence concerns
//!
//! This module owns everything that touches the data file:
//! - Storage backends (file-backed and in-memory)
//! - The user repository over the collection document

pub mod repository;
pub mod storage;

pub use repository::{JsonUserRepository, UserRepository};
pub use storage::{Document, FileStorage, MemoryStorage, Storage};
