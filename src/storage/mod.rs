//! Custom list storage.
//!
//! [`ListStorage`] is the only seam through which custom lists are read or
//! written. Backends persist whole per-user lists; they do not interpret
//! titles.

pub mod json_file;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

pub use json_file::JsonFileStorage;
pub use memory::MemoryListStorage;
pub use sqlite::SqliteListStorage;

/// Errors that can occur when reading or writing custom lists.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize custom lists: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Custom list document is corrupt: {0}")]
    Corrupt(String),
}

/// Persistence for per-user title lists, keyed by user id.
#[async_trait]
pub trait ListStorage: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Loads one user's titles in insertion order; unknown users yield an empty list.
    async fn load(&self, user_id: &str) -> Result<Vec<String>, StorageError>;

    /// Replaces one user's titles.
    async fn save(&self, user_id: &str, titles: &[String]) -> Result<(), StorageError>;

    /// Verifies the backend is reachable and readable.
    async fn check(&self) -> Result<(), StorageError>;
}
