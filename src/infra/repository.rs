//! User repository over the document storage.
//!
//! All record-level operations are whole-document read-modify-write
//! cycles. Mutations are serialized through a single writer lock so two
//! concurrent requests cannot interleave their cycles and lose updates;
//! reads go straight to storage.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::default_avatar_url;
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::AppResult;
use crate::infra::storage::{Document, Storage};

/// Record-level operations over the user collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of the collection. `total` and `total_pages` are computed
    /// over the entire collection (not the returned slice), with
    /// `total_pages` derived from the requested page size. Out-of-range
    /// pages yield an empty `data` slice, not an error.
    async fn list(&self, page: u64, per_page: u64) -> AppResult<Document>;

    /// Find a record by id.
    async fn find_by_id(&self, id: u64) -> AppResult<Option<User>>;

    /// Find a record by email (case-sensitive exact match).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new record. Assigns `max(existing ids, 0) + 1` and
    /// defaults the avatar from the assigned id when the form omitted one.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Shallow-merge the provided fields onto the existing record.
    /// Absent fields are preserved and the id is never overwritten.
    async fn update(&self, id: u64, changes: UserChanges) -> AppResult<Option<User>>;

    /// Remove the record if present. Returns whether anything was removed.
    async fn delete(&self, id: u64) -> AppResult<bool>;
}

/// Repository backed by a whole-document [`Storage`].
pub struct JsonUserRepository<S: Storage> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: Storage> JsonUserRepository<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<S: Storage> UserRepository for JsonUserRepository<S> {
    async fn list(&self, page: u64, per_page: u64) -> AppResult<Document> {
        let document = self.storage.read().await?;

        let total = document.data.len() as u64;
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        let start = page.saturating_sub(1).saturating_mul(per_page) as usize;
        let data: Vec<User> = document
            .data
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Ok(Document {
            page,
            per_page,
            total,
            total_pages,
            data,
        })
    }

    async fn find_by_id(&self, id: u64) -> AppResult<Option<User>> {
        let document = self.storage.read().await?;
        Ok(document.data.into_iter().find(|user| user.id == id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let document = self.storage.read().await?;
        Ok(document.data.into_iter().find(|user| user.email == email))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.storage.read().await?;
        let id = document.next_id();

        let user = User {
            id,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            avatar: new_user.avatar.unwrap_or_else(|| default_avatar_url(id)),
            password: new_user.password_hash,
        };

        document.data.push(user.clone());
        document.recompute_totals();
        self.storage.write(&document).await?;

        Ok(user)
    }

    async fn update(&self, id: u64, changes: UserChanges) -> AppResult<Option<User>> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.storage.read().await?;
        let Some(user) = document.data.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(avatar) = changes.avatar {
            user.avatar = avatar;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password = password_hash;
        }

        let updated = user.clone();
        self.storage.write(&document).await?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: u64) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.storage.read().await?;
        let Some(index) = document.data.iter().position(|user| user.id == id) else {
            return Ok(false);
        };

        document.data.remove(index);
        document.recompute_totals();
        self.storage.write(&document).await?;

        Ok(true)
    }
}
