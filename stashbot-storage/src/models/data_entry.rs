//! Data entry model for persistence.
//!
//! Maps to the `data_entries` table and is used by DataEntryRepository. At
//! most one entry exists per (user, key); keys are stored lower-cased.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an entry was created: explicit `/save` or implicit note capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    Custom,
    Note,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Custom => "custom",
            EntryType::Note => "note",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DataEntry {
    pub id: String,
    /// Internal id of the owning user (`users.id`).
    pub user_id: String,
    pub data_key: String,
    pub data_value: String,
    pub data_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DataEntry {
    /// Creates a new entry with a generated UUID; created and updated
    /// timestamps start out equal.
    pub fn new(user_id: String, data_key: String, data_value: String, data_type: EntryType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            data_key,
            data_value,
            data_type: data_type.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
