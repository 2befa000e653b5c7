//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// User domain entity as persisted in the collection document.
///
/// `password` holds an Argon2 hash, never plain text. The entity
/// serializes it because the document on disk is its storage format;
/// HTTP responses go through [`UserResponse`] or [`Identity`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub password: String,
}

/// Fields for a new record. The password arrives already hashed;
/// the repository assigns the id and defaults the avatar from it.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub password_hash: String,
}

/// Partial update: `None` fields are preserved, the id never changes.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub password_hash: Option<String>,
}

/// User create form (admin CRUD)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserForm {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "janet.weaver@reqres.in")]
    pub email: String,
    /// First name (minimum 2 characters)
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    #[schema(example = "Janet")]
    pub first_name: String,
    /// Last name (minimum 2 characters)
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    #[schema(example = "Weaver")]
    pub last_name: String,
    /// Avatar URL (defaulted from the assigned id when omitted)
    #[validate(url(message = "Avatar must be a valid URL"))]
    #[schema(example = "https://reqres.in/img/faces/2-image.jpg")]
    pub avatar: Option<String>,
    /// Password (minimum 6 characters; a fixed fallback is used when omitted)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// User update form (admin CRUD, shallow merge onto the existing record)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdateForm {
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New first name
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: Option<String>,
    /// New last name
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: Option<String>,
    /// New avatar URL
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
    /// New password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// User response (safe to return to client, no password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: u64,
    /// User email address
    #[schema(example = "george.bluth@reqres.in")]
    pub email: String,
    /// First name
    #[schema(example = "George")]
    pub first_name: String,
    /// Last name
    #[schema(example = "Bluth")]
    pub last_name: String,
    /// Avatar URL
    #[schema(example = "https://reqres.in/img/faces/1-image.jpg")]
    pub avatar: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
        }
    }
}

/// Minimal password-free representation of an authenticated user,
/// suitable for embedding in a session token. The id is carried as a
/// string to match what session frameworks expect of a subject.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Identity {
    #[schema(example = "1")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
        }
    }
}

/// Registration password rule: at least one uppercase letter, one
/// lowercase letter, and one digit. Length is validated separately.
pub fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_complexity");
        error.message = Some(
            "Password must contain at least one uppercase letter, one lowercase letter, and one digit"
                .into(),
        );
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_form_valid() {
        let form = UserForm {
            email: "janet.weaver@reqres.in".to_string(),
            first_name: "Janet".to_string(),
            last_name: "Weaver".to_string(),
            avatar: None,
            password: Some("secret1".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_user_form_rejects_bad_email_and_short_names() {
        let form = UserForm {
            email: "not-an-email".to_string(),
            first_name: "J".to_string(),
            last_name: "W".to_string(),
            avatar: None,
            password: None,
        };
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[test]
    fn test_user_form_rejects_malformed_avatar_url() {
        let form = UserForm {
            email: "janet.weaver@reqres.in".to_string(),
            first_name: "Janet".to_string(),
            last_name: "Weaver".to_string(),
            avatar: Some("not a url".to_string()),
            password: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("avatar"));
    }

    #[test]
    fn test_update_form_empty_is_valid() {
        assert!(UserUpdateForm::default().validate().is_ok());
    }

    #[test]
    fn test_password_complexity() {
        assert!(validate_password_complexity("Abcdefg1").is_ok());
        // Missing uppercase
        assert!(validate_password_complexity("alllowercase1").is_err());
        // Missing digit
        assert!(validate_password_complexity("NoDigitsHere").is_err());
        // Missing lowercase
        assert!(validate_password_complexity("ALLUPPER1").is_err());
    }

    #[test]
    fn test_identity_strips_password_and_stringifies_id() {
        let user = User {
            id: 1,
            email: "george.bluth@reqres.in".to_string(),
            first_name: "George".to_string(),
            last_name: "Bluth".to_string(),
            avatar: "https://reqres.in/img/faces/1-image.jpg".to_string(),
            password: "$argon2id$hash".to_string(),
        };
        let identity = Identity::from(user);
        assert_eq!(identity.id, "1");
        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("password").is_none());
    }
}
