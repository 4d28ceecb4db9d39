//! Data entry repository: the per-user key/value store.
//!
//! Keys are lower-cased before lookup and storage. The UNIQUE(user_id,
//! data_key) constraint plus insert-or-ignore-then-update keeps a concurrent
//! save of the same key from producing a duplicate row: the loser of the
//! insert race falls through to the update path.

use crate::error::StorageError;
use crate::models::{DataEntry, EntryType};
use crate::sqlite_pool::SqlitePoolManager;
use chrono::Utc;
use tracing::info;

/// Whether a save inserted a fresh entry or updated an existing one. Drives
/// the user-facing confirmation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

#[derive(Clone)]
pub struct DataEntryRepository {
    pool_manager: SqlitePoolManager,
}

impl DataEntryRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS data_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                data_key TEXT NOT NULL,
                data_value TEXT NOT NULL,
                data_type TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, data_key)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_data_entries_user_id ON data_entries(user_id)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Upserts the entry for (user, lower-cased key). A fresh key inserts a
    /// new row with the given type; an existing key keeps its row and type
    /// and gets its value and update timestamp replaced in place.
    pub async fn save(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
        entry_type: EntryType,
    ) -> Result<SaveOutcome, StorageError> {
        let pool = self.pool_manager.pool();
        let key = key.to_lowercase();

        let entry = DataEntry::new(
            user_id.to_string(),
            key.clone(),
            value.to_string(),
            entry_type,
        );

        let inserted = sqlx::query(
            r#"
            INSERT INTO data_entries (id, user_id, data_key, data_value, data_type, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, data_key) DO NOTHING
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.data_key)
        .bind(&entry.data_value)
        .bind(&entry.data_type)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(pool)
        .await?;

        if inserted.rows_affected() == 1 {
            info!(user_id, key = %key, "Created data entry");
            return Ok(SaveOutcome::Created);
        }

        sqlx::query(
            "UPDATE data_entries SET data_value = ?, updated_at = ? WHERE user_id = ? AND data_key = ?",
        )
        .bind(value)
        .bind(Utc::now())
        .bind(user_id)
        .bind(&key)
        .execute(pool)
        .await?;

        info!(user_id, key = %key, "Updated data entry in place");
        Ok(SaveOutcome::Updated)
    }

    /// Returns every entry for the user ordered by creation time, newest
    /// first. Empty is a normal outcome.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<DataEntry>, StorageError> {
        let pool = self.pool_manager.pool();

        let entries: Vec<DataEntry> = sqlx::query_as(
            "SELECT * FROM data_entries WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Deletes the entry for (user, lower-cased key) and returns the number
    /// of rows removed. Zero is a normal "not found" outcome.
    pub async fn delete_by_key(&self, user_id: &str, key: &str) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();
        let key = key.to_lowercase();

        let result = sqlx::query("DELETE FROM data_entries WHERE user_id = ? AND data_key = ?")
            .bind(user_id)
            .bind(&key)
            .execute(pool)
            .await?;

        info!(
            user_id,
            key = %key,
            deleted = result.rows_affected(),
            "Deleted data entries by key"
        );
        Ok(result.rows_affected())
    }
}
