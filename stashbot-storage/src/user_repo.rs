//! User repository: idempotent get-or-create keyed on the platform account id.
//!
//! Uses SqlitePoolManager and UserRecord. Callers use ensure/list_all.

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::info;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                telegram_id INTEGER NOT NULL UNIQUE,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                is_bot INTEGER NOT NULL,
                language_code TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Resolves a platform account id to the internal user id, creating the
    /// record on first contact. Idempotent: a second call with the same
    /// `telegram_id` returns the same id and never overwrites the fields
    /// written when the row was created.
    pub async fn ensure(
        &self,
        telegram_id: i64,
        username: Option<&str>,
        first_name: &str,
        last_name: Option<&str>,
        is_bot: bool,
        language_code: Option<&str>,
    ) -> Result<String, StorageError> {
        let pool = self.pool_manager.pool();

        let record = UserRecord::new(
            telegram_id,
            username.map(str::to_string),
            Some(first_name.to_string()),
            last_name.map(str::to_string),
            is_bot,
            language_code.map(str::to_string),
        );

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, telegram_id, username, first_name, last_name, is_bot, language_code, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(telegram_id) DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(record.telegram_id)
        .bind(&record.username)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.is_bot)
        .bind(&record.language_code)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        if inserted.rows_affected() == 1 {
            info!(telegram_id, user_id = %record.id, "Created user on first contact");
            return Ok(record.id);
        }

        let row: (String,) = sqlx::query_as("SELECT id FROM users WHERE telegram_id = ?")
            .bind(telegram_id)
            .fetch_one(pool)
            .await?;

        Ok(row.0)
    }

    /// Returns every user, newest first. Serves the admin projection.
    pub async fn list_all(&self) -> Result<Vec<UserRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let users: Vec<UserRecord> =
            sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(users)
    }
}
