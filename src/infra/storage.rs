//! Storage backends for the user collection document.
//!
//! The whole collection lives in one JSON document. `Storage` is the
//! injected capability the repository reads and writes through, so tests
//! and ephemeral runs can substitute an in-memory document for the file.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_USER_PASSWORD, SEED_USER_AVATAR,
    SEED_USER_EMAIL, SEED_USER_FIRST_NAME, SEED_USER_LAST_NAME,
};
use crate::domain::{Password, User};
use crate::errors::AppResult;

/// The single JSON structure holding the entire user collection plus
/// pagination metadata.
///
/// Invariants maintained by every writer: `total == data.len()`,
/// `total_pages == ceil(total / per_page)`, and no two records share an
/// id or an email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<User>,
}

impl Document {
    /// Initial document for a freshly created data file: one example
    /// record with its password stored hashed.
    pub fn seed() -> AppResult<Self> {
        let seed_user = User {
            id: 1,
            email: SEED_USER_EMAIL.to_string(),
            first_name: SEED_USER_FIRST_NAME.to_string(),
            last_name: SEED_USER_LAST_NAME.to_string(),
            avatar: SEED_USER_AVATAR.to_string(),
            password: Password::new(DEFAULT_USER_PASSWORD)?.into_string(),
        };

        let mut document = Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
            data: vec![seed_user],
        };
        document.recompute_totals();
        Ok(document)
    }

    /// Empty document, used by tests that want full control of the data.
    pub fn empty() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
            data: Vec::new(),
        }
    }

    /// Restore `total`/`total_pages` after mutating `data`.
    pub fn recompute_totals(&mut self) {
        self.total = self.data.len() as u64;
        self.total_pages = if self.per_page > 0 {
            (self.total + self.per_page - 1) / self.per_page
        } else {
            0
        };
    }

    /// Next id to assign: one past the highest persisted id. Recomputed
    /// from the data rather than an in-memory counter, so restarts
    /// continue from whatever is on disk.
    pub fn next_id(&self) -> u64 {
        self.data.iter().map(|user| user.id).max().unwrap_or(0) + 1
    }
}

/// Capability to read and replace the collection document.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the whole document, creating and seeding it first if absent.
    async fn read(&self) -> AppResult<Document>;

    /// Replace the whole document.
    async fn write(&self, document: &Document) -> AppResult<()>;
}

/// File-backed storage: one JSON document on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the data directory and seed the file if missing.
    /// Returns `true` when a new file was created.
    pub async fn initialize(&self) -> AppResult<bool> {
        self.ensure_dir().await?;

        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        let document = Document::seed()?;
        self.write_document(&document).await?;
        tracing::info!(path = %self.path.display(), "Seeded new data file");
        Ok(true)
    }

    async fn ensure_dir(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    async fn write_document(&self, document: &Document) -> AppResult<()> {
        let text = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self) -> AppResult<Document> {
        self.initialize().await?;
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn write(&self, document: &Document) -> AppResult<()> {
        self.ensure_dir().await?;
        self.write_document(document).await
    }
}

/// In-memory storage holding the document behind a lock.
/// Substitutes for [`FileStorage`] in tests and ephemeral runs.
pub struct MemoryStorage {
    document: Mutex<Document>,
}

impl MemoryStorage {
    /// Seeded like a fresh data file.
    pub fn seeded() -> AppResult<Self> {
        Ok(Self::with_document(Document::seed()?))
    }

    /// Start from an explicit document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }

    /// Start empty.
    pub fn empty() -> Self {
        Self::with_document(Document::empty())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self) -> AppResult<Document> {
        Ok(self.document.lock().await.clone())
    }

    async fn write(&self, document: &Document) -> AppResult<()> {
        *self.document.lock().await = document.clone();
        Ok(())
    }
}
