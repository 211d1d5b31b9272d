use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CustomListEntry {
    pub user_id: String,
    pub position: i64, // zero-based, insertion order
    pub title: String,
    pub created_at: String,
}

impl CustomListEntry {
    pub async fn find_by_user(
        pool: &sqlx::SqlitePool,
        user_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CustomListEntry>(
            "SELECT user_id, position, title, created_at FROM custom_list_entries WHERE user_id = ? ORDER BY position"
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replaces a user's entries in one transaction.
    pub async fn replace_for_user(
        pool: &sqlx::SqlitePool,
        user_id: &str,
        titles: &[String],
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM custom_list_entries WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for (position, title) in titles.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO custom_list_entries (user_id, position, title, created_at)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(user_id)
            .bind(position as i64)
            .bind(title)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    pub async fn count_users(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT user_id) FROM custom_list_entries")
            .fetch_one(pool)
            .await
    }
}
