//! User service - Handles user-related business logic.
//!
//! The single place that enforces email uniqueness and turns validated
//! forms into repository operations. Handlers never re-implement these
//! rules.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::DEFAULT_USER_PASSWORD;
use crate::domain::{Identity, NewUser, Password, User, UserChanges, UserForm, UserUpdateForm, DUMMY_HASH};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Document, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// One page of the collection, full-collection totals.
    async fn list_users(&self, page: u64, per_page: u64) -> AppResult<Document>;

    /// Get a user by id.
    async fn get_user(&self, id: u64) -> AppResult<User>;

    /// Look a user up by email (case-sensitive exact match).
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. Fails with `DuplicateEmail` when a record with that
    /// email already exists; the store is left untouched in that case.
    async fn create_user(&self, form: UserForm) -> AppResult<User>;

    /// Shallow-merge an update onto an existing user. Changing the email
    /// to one held by another record fails with `DuplicateEmail`.
    async fn update_user(&self, id: u64, form: UserUpdateForm) -> AppResult<User>;

    /// Delete a user, `NotFound` when absent.
    async fn delete_user(&self, id: u64) -> AppResult<()>;

    /// Check credentials against the stored hash. Returns the
    /// password-free identity on success, `None` on any mismatch without
    /// distinguishing unknown email from wrong password.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<Identity>>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn ensure_email_free(&self, email: &str, own_id: Option<u64>) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != own_id => Err(AppError::DuplicateEmail),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R: UserRepository> UserService for UserManager<R> {
    async fn list_users(&self, page: u64, per_page: u64) -> AppResult<Document> {
        self.repo.list(page, per_page).await
    }

    async fn get_user(&self, id: u64) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn create_user(&self, form: UserForm) -> AppResult<User> {
        self.ensure_email_free(&form.email, None).await?;

        let plain = form
            .password
            .unwrap_or_else(|| DEFAULT_USER_PASSWORD.to_string());
        let password_hash = Password::new(&plain)?.into_string();

        self.repo
            .create(NewUser {
                email: form.email,
                first_name: form.first_name,
                last_name: form.last_name,
                avatar: form.avatar,
                password_hash,
            })
            .await
    }

    async fn update_user(&self, id: u64, form: UserUpdateForm) -> AppResult<User> {
        if let Some(email) = &form.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let password_hash = match &form.password {
            Some(plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        self.repo
            .update(
                id,
                UserChanges {
                    email: form.email,
                    first_name: form.first_name,
                    last_name: form.last_name,
                    avatar: form.avatar,
                    password_hash,
                },
            )
            .await?
            .ok_or_not_found()
    }

    async fn delete_user(&self, id: u64) -> AppResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<Identity>> {
        let found = self.repo.find_by_email(email).await?;

        // Verify against a dummy hash when the email is unknown, so both
        // failure paths take comparable time.
        let stored = match &found {
            Some(user) => Password::from_hash(user.password.clone()),
            None => Password::from_hash(DUMMY_HASH.to_string()),
        };
        let password_valid = stored.verify(password);

        match found {
            Some(user) if password_valid => Ok(Some(Identity::from(user))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Repo {}

        #[async_trait]
        impl UserRepository for Repo {
            async fn list(&self, page: u64, per_page: u64) -> AppResult<Document>;
            async fn find_by_id(&self, id: u64) -> AppResult<Option<User>>;
            async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
            async fn create(&self, new_user: NewUser) -> AppResult<User>;
            async fn update(&self, id: u64, changes: UserChanges) -> AppResult<Option<User>>;
            async fn delete(&self, id: u64) -> AppResult<bool>;
        }
    }

    fn sample_user(id: u64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            avatar: format!("https://reqres.in/img/faces/{}-image.jpg", id),
            password: Password::new("secret1").unwrap().into_string(),
        }
    }

    fn sample_form(email: &str) -> UserForm {
        UserForm {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            avatar: None,
            password: Some("secret1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email_without_writing() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .returning(|email| Ok(Some(sample_user(1, email))));
        // No expect_create: a create call would fail the test.

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(sample_form("taken@example.com")).await;

        assert!(matches!(result.unwrap_err(), AppError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_before_storing() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|new_user| {
            assert_ne!(new_user.password_hash, "secret1");
            assert!(Password::from_hash(new_user.password_hash.clone()).verify("secret1"));
            Ok(User {
                id: 2,
                email: new_user.email,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                avatar: new_user.avatar.unwrap_or_default(),
                password: new_user.password_hash,
            })
        });

        let service = UserManager::new(Arc::new(repo));
        let user = service
            .create_user(sample_form("new@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, 2);
    }

    #[tokio::test]
    async fn test_update_user_allows_keeping_own_email() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(7, email))));
        repo.expect_update()
            .with(eq(7), mockall::predicate::always())
            .returning(|id, changes| {
                let mut user = sample_user(id, "same@example.com");
                if let Some(first_name) = changes.first_name {
                    user.first_name = first_name;
                }
                Ok(Some(user))
            });

        let service = UserManager::new(Arc::new(repo));
        let form = UserUpdateForm {
            email: Some("same@example.com".to_string()),
            first_name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = service.update_user(7, form).await.unwrap();
        assert_eq!(updated.first_name, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockRepo::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = UserManager::new(Arc::new(repo));
        assert!(matches!(
            service.delete_user(9).await.unwrap_err(),
            AppError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_authenticate_strips_password_and_stringifies_id() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email().returning(|email| {
            let mut user = sample_user(1, email);
            user.password = Password::new("1234").unwrap().into_string();
            Ok(Some(user))
        });

        let service = UserManager::new(Arc::new(repo));
        let identity = service
            .authenticate("george.bluth@reqres.in", "1234")
            .await
            .unwrap()
            .expect("credentials should match");
        assert_eq!(identity.id, "1");

        let refused = service
            .authenticate("george.bluth@reqres.in", "wrong")
            .await
            .unwrap();
        assert!(refused.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_is_none() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.authenticate("ghost@example.com", "1234").await;
        assert!(result.unwrap().is_none());
    }
}
