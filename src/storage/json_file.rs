use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{ListStorage, StorageError};
use crate::utils::logging::log_store_operation;

/// The persisted document: user id to titles.
pub type ListDocument = BTreeMap<String, Vec<String>>;

/// Stores every user's list in one JSON document on disk.
///
/// The whole document is read and rewritten on each save. Saves are
/// serialized so concurrent writers for different users cannot overwrite
/// each other's changes.
pub struct JsonFileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full document. A missing file is an empty document.
    pub async fn load_all(&self) -> Result<ListDocument, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ListDocument::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        if raw.trim().is_empty() {
            return Ok(ListDocument::new());
        }

        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    async fn write_all(&self, document: &ListDocument) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        tokio::fs::write(&temp_path, serialized).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ListStorage for JsonFileStorage {
    fn backend(&self) -> &'static str {
        "json"
    }

    async fn load(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        let document = self.load_all().await?;
        log_store_operation("load", user_id, None);
        Ok(document.get(user_id).cloned().unwrap_or_default())
    }

    async fn save(&self, user_id: &str, titles: &[String]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        // A document that cannot be parsed is left alone rather than replaced.
        let mut document = self.load_all().await?;
        document.insert(user_id.to_string(), titles.to_vec());
        self.write_all(&document).await?;

        log_store_operation("save", user_id, Some(&format!("{} titles", titles.len())));
        Ok(())
    }

    async fn check(&self) -> Result<(), StorageError> {
        self.load_all().await.map(|_| ())
    }
}
