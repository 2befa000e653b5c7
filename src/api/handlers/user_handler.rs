//! User CRUD handlers.
//!
//! Records are addressed by an `id` query parameter rather than a path
//! segment, matching the admin frontend's calling convention.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{UserForm, UserUpdateForm};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, Deleted, PaginationParams, UserData, UserListBody, UserPage};

/// Query parameter selecting a single record
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<u64>,
}

impl IdQuery {
    fn required(self) -> AppResult<u64> {
        self.id
            .ok_or_else(|| AppError::bad_request("User ID is required"))
    }
}

/// Create user CRUD routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_users)
            .post(create_user)
            .put(update_user)
            .delete(delete_user),
    )
}

/// List users (paginated) or fetch one by id
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Option<u64>, Query, description = "Select a single record"),
        ("page" = Option<u64>, Query, description = "Page number, 1-indexed"),
        ("per_page" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "A page of users, or a single-record envelope when id is given", body = UserListBody),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(selector): Query<IdQuery>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<UserListBody>> {
    if let Some(id) = selector.id {
        let user = state.user_service.get_user(id).await?;
        return Ok(Json(UserListBody::Single(UserData { data: user.into() })));
    }

    let document = state
        .user_service
        .list_users(pagination.page, pagination.limit())
        .await?;

    Ok(Json(UserListBody::Page(UserPage::from(document))))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserForm,
    responses(
        (status = 201, description = "User created", body = UserData),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserForm>,
) -> AppResult<Created<UserData>> {
    let user = state.user_service.create_user(payload).await?;
    Ok(Created(UserData { data: user.into() }))
}

/// Update a user (shallow merge of provided fields)
#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = u64, Query, description = "Record to update")),
    request_body = UserUpdateForm,
    responses(
        (status = 200, description = "User updated", body = UserData),
        (status = 400, description = "Validation error, duplicate email, or missing id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    ValidatedJson(payload): ValidatedJson<UserUpdateForm>,
) -> AppResult<Json<UserData>> {
    let id = query.required()?;
    let user = state.user_service.update_user(id, payload).await?;
    Ok(Json(UserData { data: user.into() }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = u64, Query, description = "Record to delete")),
    responses(
        (status = 200, description = "User deleted", body = Deleted),
        (status = 400, description = "Missing id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Deleted>> {
    let id = query.required()?;
    state.user_service.delete_user(id).await?;
    Ok(Json(Deleted::ok()))
}
