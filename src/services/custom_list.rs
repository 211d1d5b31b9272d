//! Per-user custom anime lists.
//!
//! Titles are compared by their normalized form (trimmed, lowercased) but
//! stored exactly as the user typed them. Every mutation is a
//! load-modify-store cycle against the injected [`ListStorage`], run under a
//! per-user lock so two commands from the same user cannot lose an update.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::services::schedule::AggregatedAnime;
use crate::storage::{ListStorage, StorageError};
use crate::utils::logging::log_store_error;
use crate::utils::validation::normalize_title;

pub struct CustomListStore {
    storage: Arc<dyn ListStorage>,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CustomListStore {
    pub fn new(storage: Arc<dyn ListStorage>) -> Self {
        Self {
            storage,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.storage.backend()
    }

    pub async fn check(&self) -> Result<(), StorageError> {
        self.storage.check().await
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Reads a list for display, treating an unreadable store as empty.
    async fn load_or_empty(&self, user_id: &str) -> Vec<String> {
        match self.storage.load(user_id).await {
            Ok(titles) => titles,
            Err(e) => {
                log_store_error("load", user_id, &e.to_string());
                Vec::new()
            }
        }
    }

    /// Reads a list for a mutation; a failed read aborts the mutation.
    async fn load_strict(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
        self.storage.load(user_id).await.map_err(|e| {
            log_store_error("load", user_id, &e.to_string());
            e
        })
    }

    /// The user's titles in insertion order; empty for unknown users.
    pub async fn get_user_list(&self, user_id: &str) -> Vec<String> {
        self.load_or_empty(user_id).await
    }

    /// Appends `title` unless an equivalent title is already present.
    ///
    /// Returns `Ok(false)` without touching storage for duplicates.
    pub async fn add_anime(&self, user_id: &str, title: &str) -> Result<bool, StorageError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut titles = self.load_strict(user_id).await?;
        let normalized = normalize_title(title);

        if titles.iter().any(|existing| normalize_title(existing) == normalized) {
            return Ok(false);
        }

        titles.push(title.to_string());
        self.persist(user_id, &titles).await?;
        Ok(true)
    }

    /// Removes every title equivalent to `title`.
    pub async fn remove_anime(&self, user_id: &str, title: &str) -> Result<bool, StorageError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut titles = self.load_strict(user_id).await?;
        let normalized = normalize_title(title);
        let before = titles.len();

        titles.retain(|existing| normalize_title(existing) != normalized);

        if titles.len() == before {
            return Ok(false);
        }

        self.persist(user_id, &titles).await?;
        Ok(true)
    }

    /// Empties the list. Returns `Ok(false)` if there was nothing to clear.
    pub async fn clear_list(&self, user_id: &str) -> Result<bool, StorageError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        if self.load_strict(user_id).await?.is_empty() {
            return Ok(false);
        }

        self.persist(user_id, &[]).await?;
        Ok(true)
    }

    /// Keeps the entries of `schedule` whose title is on the user's list.
    ///
    /// An empty custom list matches nothing.
    pub async fn filter_by_custom_list(
        &self,
        user_id: &str,
        schedule: Vec<AggregatedAnime>,
    ) -> Vec<AggregatedAnime> {
        let titles = self.load_or_empty(user_id).await;
        filter_by_titles(&titles, schedule)
    }

    async fn persist(&self, user_id: &str, titles: &[String]) -> Result<(), StorageError> {
        self.storage.save(user_id, titles).await.map_err(|e| {
            log_store_error("save", user_id, &e.to_string());
            e
        })
    }
}

/// Pure intersection of a schedule with a list of titles, schedule order kept.
pub fn filter_by_titles(titles: &[String], schedule: Vec<AggregatedAnime>) -> Vec<AggregatedAnime> {
    if titles.is_empty() {
        return Vec::new();
    }

    let wanted: HashSet<String> = titles.iter().map(|t| normalize_title(t)).collect();

    schedule
        .into_iter()
        .filter(|anime| wanted.contains(&normalize_title(&anime.display_title)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryListStorage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn store() -> CustomListStore {
        CustomListStore::new(Arc::new(MemoryListStorage::new()))
    }

    fn anime(title: &str) -> AggregatedAnime {
        AggregatedAnime {
            display_title: title.to_string(),
            episode: "1".to_string(),
            status: "Ongoing".to_string(),
            broadcast_entries: Vec::new(),
        }
    }

    struct BrokenStorage;

    #[async_trait]
    impl ListStorage for BrokenStorage {
        fn backend(&self) -> &'static str {
            "broken"
        }

        async fn load(&self, _user_id: &str) -> Result<Vec<String>, StorageError> {
            Err(StorageError::Corrupt("unreadable".to_string()))
        }

        async fn save(&self, _user_id: &str, _titles: &[String]) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        async fn check(&self) -> Result<(), StorageError> {
            Err(StorageError::Corrupt("unreadable".to_string()))
        }
    }

    /// Memory storage whose reads fail while `locked` is set.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryListStorage,
        locked: AtomicBool,
        read_only: AtomicBool,
    }

    #[async_trait]
    impl ListStorage for FlakyStorage {
        fn backend(&self) -> &'static str {
            "flaky"
        }

        async fn load(&self, user_id: &str) -> Result<Vec<String>, StorageError> {
            if self.locked.load(Ordering::SeqCst) {
                return Err(StorageError::Corrupt("database is locked".to_string()));
            }
            self.inner.load(user_id).await
        }

        async fn save(&self, user_id: &str, titles: &[String]) -> Result<(), StorageError> {
            if self.read_only.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.inner.save(user_id, titles).await
        }

        async fn check(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_add_is_case_and_whitespace_insensitive() {
        let store = store();
        assert!(store.add_anime("u1", "One Piece").await.unwrap());
        assert!(!store.add_anime("u1", "one piece ").await.unwrap());
        assert_eq!(store.get_user_list("u1").await, vec!["One Piece"]);
    }

    #[tokio::test]
    async fn test_remove_matches_normalized() {
        let store = store();
        store.add_anime("u1", "One Piece").await.unwrap();
        assert!(store.remove_anime("u1", "ONE PIECE").await.unwrap());
        assert!(store.get_user_list("u1").await.is_empty());
        assert!(!store.remove_anime("u1", "ONE PIECE").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_unknown_and_known_user() {
        let store = store();
        assert!(!store.clear_list("nobody").await.unwrap());

        store.add_anime("u1", "Frieren").await.unwrap();
        assert!(store.clear_list("u1").await.unwrap());
        assert!(store.get_user_list("u1").await.is_empty());
        assert!(!store.clear_list("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_lists_are_partitioned_by_user() {
        let store = store();
        store.add_anime("u1", "Naruto").await.unwrap();
        store.add_anime("u2", "Bleach").await.unwrap();
        assert_eq!(store.get_user_list("u1").await, vec!["Naruto"]);
        assert_eq!(store.get_user_list("u2").await, vec!["Bleach"]);
    }

    #[tokio::test]
    async fn test_filter_with_empty_list_matches_nothing() {
        let store = store();
        let schedule = vec![anime("Naruto"), anime("Bleach")];
        assert!(store.filter_by_custom_list("u1", schedule).await.is_empty());
    }

    #[tokio::test]
    async fn test_filter_preserves_schedule_order() {
        let store = store();
        store.add_anime("u1", "  naruto").await.unwrap();
        store.add_anime("u1", "BLEACH").await.unwrap();

        let schedule = vec![anime("Bleach"), anime("Frieren"), anime("Naruto")];
        let filtered = store.filter_by_custom_list("u1", schedule).await;
        let titles: Vec<&str> = filtered.iter().map(|a| a.display_title.as_str()).collect();
        assert_eq!(titles, vec!["Bleach", "Naruto"]);
    }

    #[tokio::test]
    async fn test_unreadable_store_reads_as_empty() {
        let store = CustomListStore::new(Arc::new(BrokenStorage));
        assert!(store.get_user_list("u1").await.is_empty());
        assert!(store
            .filter_by_custom_list("u1", vec![anime("Naruto")])
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_failed_read_aborts_mutations() {
        let storage = Arc::new(FlakyStorage::default());
        let store = CustomListStore::new(storage.clone());
        store.add_anime("u1", "One Piece").await.unwrap();
        store.add_anime("u1", "Frieren").await.unwrap();

        storage.locked.store(true, Ordering::SeqCst);
        assert!(matches!(
            store.add_anime("u1", "Naruto").await,
            Err(StorageError::Corrupt(_))
        ));
        assert!(store.remove_anime("u1", "Frieren").await.is_err());
        assert!(store.clear_list("u1").await.is_err());

        storage.locked.store(false, Ordering::SeqCst);
        assert_eq!(store.get_user_list("u1").await, vec!["One Piece", "Frieren"]);
    }

    #[tokio::test]
    async fn test_failed_save_propagates() {
        let storage = Arc::new(FlakyStorage::default());
        storage.read_only.store(true, Ordering::SeqCst);
        let store = CustomListStore::new(storage);
        assert!(matches!(
            store.add_anime("u1", "Naruto").await,
            Err(StorageError::Io(_))
        ));
        assert!(store.get_user_list("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_adds_for_same_user_are_not_lost() {
        let store = Arc::new(store());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add_anime("u1", &format!("Title {i}")).await.unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(store.get_user_list("u1").await.len(), 20);
    }
}
