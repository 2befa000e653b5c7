//! Response envelope types shared by the handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Identity, UserResponse};

use super::pagination::UserPage;

/// `{ "data": ... }` envelope used by the single-record endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub data: UserResponse,
}

impl From<UserResponse> for UserData {
    fn from(data: UserResponse) -> Self {
        Self { data }
    }
}

/// Body of the user list endpoint: a single-record envelope when `id`
/// was given, otherwise one page of the collection
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UserListBody {
    Single(UserData),
    Page(UserPage),
}

/// `{ "success": true }` body returned by the delete endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    pub success: bool,
}

impl Deleted {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "message": ..., "user": ... }` body returned by registration
#[derive(Debug, Serialize, ToSchema)]
pub struct Registered {
    pub message: String,
    pub user: Identity,
}

impl Registered {
    pub fn new(message: impl Into<String>, user: Identity) -> Self {
        Self {
            message: message.into(),
            user,
        }
    }
}

/// Created response helper (common pattern for POST endpoints)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
