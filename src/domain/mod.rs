//! Domain layer - Core business entities and logic
//!
//! Contains the core models that represent business concepts
//! independent of infrastructure concerns: the user entity, its
//! form/response views, and the password value object.

pub mod password;
pub mod user;

pub use password::{Password, DUMMY_HASH};
pub use user::{
    validate_password_complexity, Identity, NewUser, User, UserChanges, UserForm, UserResponse,
    UserUpdateForm,
};
