//! User record model for persistence.
//!
//! Maps to the `users` table and is used by UserRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    /// The messaging platform's stable numeric account id. Unique, immutable.
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub language_code: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    /// A missing language code defaults to `en`.
    pub fn new(
        telegram_id: i64,
        username: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        is_bot: bool,
        language_code: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            telegram_id,
            username,
            first_name,
            last_name,
            is_bot,
            language_code: language_code.unwrap_or_else(|| "en".to_string()),
            created_at: Utc::now(),
        }
    }
}
