use anime_schedule_bot::database::{connection::DatabaseManager, models::*};
use anime_schedule_bot::services::custom_list::CustomListStore;
use anime_schedule_bot::storage::{ListStorage, SqliteListStorage};
use anyhow::Result;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

fn titles(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_entries_keep_insertion_order() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    CustomListEntry::replace_for_user(&db.pool, "42", &titles(&["Zom 100", "Bleach", "Naruto"]))
        .await?;

    let entries = CustomListEntry::find_by_user(&db.pool, "42").await?;
    let stored: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(stored, vec!["Zom 100", "Bleach", "Naruto"]);
    assert_eq!(entries[0].position, 0);
    assert_eq!(entries[2].position, 2);
    assert!(entries.iter().all(|e| e.user_id == "42"));

    Ok(())
}

#[tokio::test]
async fn test_replace_overwrites_previous_entries() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    CustomListEntry::replace_for_user(&db.pool, "42", &titles(&["Naruto", "Bleach"])).await?;
    CustomListEntry::replace_for_user(&db.pool, "42", &titles(&["Frieren"])).await?;

    let entries = CustomListEntry::find_by_user(&db.pool, "42").await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Frieren");

    CustomListEntry::replace_for_user(&db.pool, "42", &[]).await?;
    assert!(CustomListEntry::find_by_user(&db.pool, "42").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_count_users() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    assert_eq!(CustomListEntry::count_users(&db.pool).await?, 0);

    CustomListEntry::replace_for_user(&db.pool, "1", &titles(&["Naruto", "Bleach"])).await?;
    CustomListEntry::replace_for_user(&db.pool, "2", &titles(&["Naruto"])).await?;
    assert_eq!(CustomListEntry::count_users(&db.pool).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_sqlite_storage_round_trip() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let storage = SqliteListStorage::new(db);

    assert_eq!(storage.backend(), "sqlite");
    assert!(storage.check().await.is_ok());
    assert!(storage.load("unknown").await?.is_empty());

    storage.save("7", &titles(&["One Piece", "Frieren"])).await?;
    storage.save("8", &titles(&["Bleach"])).await?;

    assert_eq!(storage.load("7").await?, titles(&["One Piece", "Frieren"]));
    assert_eq!(storage.load("8").await?, titles(&["Bleach"]));

    Ok(())
}

#[tokio::test]
async fn test_custom_list_store_over_sqlite() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let store = CustomListStore::new(Arc::new(SqliteListStorage::new(db.clone())));

    assert!(store.add_anime("42", "One Piece").await?);
    assert!(!store.add_anime("42", "  one piece").await?);
    assert!(store.add_anime("42", "Frieren").await?);
    assert!(store.remove_anime("42", "ONE PIECE").await?);

    assert_eq!(store.get_user_list("42").await, titles(&["Frieren"]));
    assert_eq!(CustomListEntry::count_users(&db.pool).await?, 1);

    assert!(store.clear_list("42").await?);
    assert!(store.get_user_list("42").await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_lists_survive_reconnect() -> Result<()> {
    let temp_dir = tempdir()?;
    let database_url = format!("sqlite:{}", temp_dir.path().join("lists.db").display());

    {
        let db = DatabaseManager::new(&database_url).await?;
        db.run_migrations().await?;
        SqliteListStorage::new(db)
            .save("42", &titles(&["Naruto"]))
            .await?;
    }

    let db = DatabaseManager::new(&database_url).await?;
    db.run_migrations().await?;
    assert_eq!(SqliteListStorage::new(db).load("42").await?, titles(&["Naruto"]));

    Ok(())
}

#[tokio::test]
async fn test_database_manager_creates_nested_directory() -> Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("nested/data/lists.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db = DatabaseManager::new(&database_url).await?;
    db.run_migrations().await?;

    assert!(db_path.exists());
    Ok(())
}
