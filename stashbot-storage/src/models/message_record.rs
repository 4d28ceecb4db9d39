//! Message record model for persistence.
//!
//! Maps to the `messages` table and is used by MessageRepository. Append-only:
//! records are never mutated or deleted once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    /// Internal id of the owning user (`users.id`).
    pub user_id: String,
    /// Text or caption of the inbound message; None for bare media.
    pub content: Option<String>,
    pub message_type: String,
    pub telegram_message_id: i64,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(
        user_id: String,
        content: Option<String>,
        message_type: String,
        telegram_message_id: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            content,
            message_type,
            telegram_message_id,
            created_at: Utc::now(),
        }
    }
}
