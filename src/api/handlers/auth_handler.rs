//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::validate_password_complexity;
use crate::errors::AppResult;
use crate::services::{OAuthProfile, Registration, TokenResponse};
use crate::types::{Created, Registered};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password: minimum 8 characters with at least one uppercase
    /// letter, one lowercase letter, and one digit
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = validate_password_complexity)
    )]
    #[schema(example = "SecurePass1", min_length = 8)]
    pub password: String,
    /// First name (minimum 2 characters)
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    #[schema(example = "John")]
    pub first_name: String,
    /// Last name (minimum 2 characters)
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    #[schema(example = "Doe")]
    pub last_name: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "george.bluth@reqres.in")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Profile reported by an OAuth provider after its own exchange
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OAuthRequest {
    /// Provider-verified email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Display name as reported by the provider
    pub name: Option<String>,
    /// Avatar URL as reported by the provider
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/oauth", post(oauth))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = Registered),
        (status = 400, description = "Validation error or duplicate email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<Registered>> {
    let identity = state
        .auth_service
        .register(Registration {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    Ok(Created(Registered::new(
        "Registration was successful",
        identity,
    )))
}

/// Login with credentials and get a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Sign in with a provider-verified profile, upserting the local record
#[utoipa::path(
    post,
    path = "/api/auth/oauth",
    tag = "Authentication",
    request_body = OAuthRequest,
    responses(
        (status = 200, description = "Sign-in successful", body = TokenResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn oauth(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OAuthRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .oauth_sign_in(OAuthProfile {
            email: payload.email,
            name: payload.name,
            avatar: payload.avatar,
        })
        .await?;

    Ok(Json(token))
}
