//! Storage crate: per-user persistence for the key/value bot.
//!
//! ## Modules
//!
//! - [`error`] – Storage error type
//! - [`models`] – UserRecord, MessageRecord, DataEntry
//! - [`user_repo`] – UserRepository (idempotent get-or-create)
//! - [`message_repo`] – MessageRepository (append-only message log)
//! - [`data_repo`] – DataEntryRepository (per-user key/value store)
//! - [`sqlite_pool`] – SqlitePoolManager

mod data_repo;
mod error;
mod message_repo;
mod models;
mod sqlite_pool;
mod user_repo;

pub use data_repo::{DataEntryRepository, SaveOutcome};
pub use error::StorageError;
pub use message_repo::MessageRepository;
pub use models::{DataEntry, EntryType, MessageRecord, UserRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
