//! Shared types for the HTTP surface.

mod pagination;
mod response;

pub use pagination::{PaginationParams, UserPage};
pub use response::{Created, Deleted, Registered, UserData, UserListBody};
