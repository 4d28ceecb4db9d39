//! Persistence models: one module per table.

mod data_entry;
mod message_record;
mod user_record;

pub use data_entry::{DataEntry, EntryType};
pub use message_record::MessageRecord;
pub use user_record::UserRecord;
