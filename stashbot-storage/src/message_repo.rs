//! Message repository: append-only log of inbound messages.
//!
//! Uses SqlitePoolManager and MessageRecord. External: SQLite via sqlx;
//! callers use save/list_for_user.

use crate::error::StorageError;
use crate::models::MessageRecord;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::info;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                content TEXT,
                message_type TEXT NOT NULL,
                telegram_message_id INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_user_id ON messages(user_id);
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn save(&self, message: &MessageRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO messages (id, user_id, content, message_type, telegram_message_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.user_id)
        .bind(&message.content)
        .bind(&message.message_type)
        .bind(message.telegram_message_id)
        .bind(message.created_at)
        .execute(pool)
        .await?;

        info!(
            message_id = %message.id,
            user_id = %message.user_id,
            message_type = %message.message_type,
            "Saved message"
        );
        Ok(())
    }

    /// Returns every message for the user, newest first. Serves the admin
    /// projection.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<MessageRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let messages: Vec<MessageRecord> = sqlx::query_as(
            "SELECT * FROM messages WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }
}
