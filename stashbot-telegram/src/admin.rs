//! Admin projection: every user joined with their data entries and message
//! log, newest user first. Assembled here, outside the command core; a
//! diagnostic and reporting surface only.

use serde::Serialize;
use stashbot_storage::{
    DataEntry, DataEntryRepository, MessageRecord, MessageRepository, StorageError, UserRecord,
    UserRepository,
};

/// One user with everything they own.
#[derive(Debug, Serialize)]
pub struct UserProjection {
    #[serde(flatten)]
    pub user: UserRecord,
    pub data: Vec<DataEntry>,
    pub messages: Vec<MessageRecord>,
}

/// Builds the full read-only projection, newest user first.
pub async fn collect_users(
    users: &UserRepository,
    entries: &DataEntryRepository,
    messages: &MessageRepository,
) -> Result<Vec<UserProjection>, StorageError> {
    let mut projections = Vec::new();

    for user in users.list_all().await? {
        let data = entries.list_for_user(&user.id).await?;
        let user_messages = messages.list_for_user(&user.id).await?;
        projections.push(UserProjection {
            user,
            data,
            messages: user_messages,
        });
    }

    Ok(projections)
}
