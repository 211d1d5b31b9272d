use async_trait::async_trait;

use super::{ListStorage, StorageError};
use crate::database::{connection::DatabaseManager, models::CustomListEntry};
use crate::utils::logging::log_store_operation;

/// Stores custom lists as rows of `custom_list_entries`, one per title.
#[derive(Clone)]
pub struct SqliteListStorage {
    db: DatabaseManager,
}

impl SqliteListStorage {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ListStorage for SqliteListStorage {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn load(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        let entries = CustomListEntry::find_by_user(&self.db.pool, user_id).await?;
        log_store_operation("load", user_id, None);
        Ok(entries.into_iter().map(|entry| entry.title).collect())
    }

    async fn save(&self, user_id: &str, titles: &[String]) -> Result<(), StorageError> {
        CustomListEntry::replace_for_user(&self.db.pool, user_id, titles).await?;
        log_store_operation("save", user_id, Some(&format!("{} titles", titles.len())));
        Ok(())
    }

    async fn check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").fetch_one(&self.db.pool).await?;
        Ok(())
    }
}
