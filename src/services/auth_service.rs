//! Authentication service - the adapter between credentials and sessions.
//!
//! Maps `credentials -> identity | nothing` through the user service,
//! issues and verifies JWT session tokens, and upserts local records for
//! OAuth sign-ins. Provider token exchange happens outside this crate;
//! by the time `oauth_sign_in` runs, the provider has already vouched
//! for the email.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Identity, Password, UserForm, UserUpdateForm};
use crate::errors::{AppError, AppResult};
use crate::services::UserService;

/// JWT claims payload. `sub` is the user id in string form.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub avatar: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    /// The authenticated identity the token was issued for
    pub user: Identity,
}

/// Profile handed over by an OAuth provider after a successful exchange.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub email: String,
    /// Display name as reported by the provider
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// Registration input, validated at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user. Fails with `DuplicateEmail` when the email
    /// is taken.
    async fn register(&self, registration: Registration) -> AppResult<Identity>;

    /// Check credentials and issue a session token. Any failure is the
    /// one opaque `InvalidCredentials` error.
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Upsert the local record for a provider-authenticated profile,
    /// keyed by email, and issue a session token.
    async fn oauth_sign_in(&self, profile: OAuthProfile) -> AppResult<TokenResponse>;

    /// Verify a session token and extract its claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for an identity (shared helper to avoid duplication)
fn generate_token(identity: Identity, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: identity.id.clone(),
        email: identity.email.clone(),
        name: format!("{} {}", identity.first_name, identity.last_name),
        avatar: identity.avatar.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        user: identity,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService over the user service.
pub struct Authenticator {
    users: Arc<dyn UserService>,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserService>, config: Config) -> Self {
        Self { users, config }
    }
}

/// Split a provider display name into first/last, falling back to the
/// email local part when the provider sent nothing usable.
fn profile_names(profile: &OAuthProfile) -> (String, String) {
    if let Some(name) = profile.name.as_deref().map(str::trim) {
        if !name.is_empty() {
            let mut parts = name.splitn(2, char::is_whitespace);
            let first = parts.next().unwrap_or(name).to_string();
            let last = parts.next().map(str::trim).unwrap_or("").to_string();
            if !last.is_empty() {
                return (first, last);
            }
            return (first, "User".to_string());
        }
    }

    let local = profile.email.split('@').next().unwrap_or("user");
    (local.to_string(), "User".to_string())
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<Identity> {
        let user = self
            .users
            .create_user(UserForm {
                email: registration.email,
                first_name: registration.first_name,
                last_name: registration.last_name,
                avatar: None,
                password: Some(registration.password),
            })
            .await?;

        Ok(Identity::from(user))
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let identity = self
            .users
            .authenticate(&email, &password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        generate_token(identity, &self.config)
    }

    async fn oauth_sign_in(&self, profile: OAuthProfile) -> AppResult<TokenResponse> {
        let identity = match self.users.get_user_by_email(&profile.email).await? {
            Some(existing) => {
                // Refresh the fields the provider reported; the local
                // record keeps everything else.
                let has_name = profile
                    .name
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|name| !name.is_empty());
                let (first_name, last_name) = if has_name {
                    let (first, last) = profile_names(&profile);
                    (Some(first), Some(last))
                } else {
                    (None, None)
                };

                let changes = UserUpdateForm {
                    first_name,
                    last_name,
                    avatar: profile.avatar.clone(),
                    ..Default::default()
                };
                if changes.first_name.is_some() || changes.avatar.is_some() {
                    Identity::from(self.users.update_user(existing.id, changes).await?)
                } else {
                    Identity::from(existing)
                }
            }
            None => {
                let (first_name, last_name) = profile_names(&profile);
                let user = self
                    .users
                    .create_user(UserForm {
                        email: profile.email,
                        first_name,
                        last_name,
                        avatar: profile.avatar,
                        password: Some(Password::random_plain()),
                    })
                    .await?;
                Identity::from(user)
            }
        };

        generate_token(identity, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
