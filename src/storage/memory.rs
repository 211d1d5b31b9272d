use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ListStorage, StorageError};

/// Process-local storage, lost on restart. Used by tests and dry runs.
#[derive(Default)]
pub struct MemoryListStorage {
    lists: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryListStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStorage for MemoryListStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.lists.read().await.get(user_id).cloned().unwrap_or_default())
    }

    async fn save(&self, user_id: &str, titles: &[String]) -> Result<(), StorageError> {
        self.lists
            .write()
            .await
            .insert(user_id.to_string(), titles.to_vec());
        Ok(())
    }

    async fn check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
