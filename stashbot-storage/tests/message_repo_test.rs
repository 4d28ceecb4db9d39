//! Integration tests for [`stashbot_storage::MessageRepository`].
//!
//! Covers append-only saves and the per-user newest-first listing using a
//! temporary SQLite database.

use stashbot_storage::{MessageRecord, MessageRepository, SqlitePoolManager};
use tempfile::TempDir;

async fn test_repo() -> (MessageRepository, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let pool_manager = SqlitePoolManager::new(db_path.to_str().unwrap())
        .await
        .expect("Failed to create pool");
    let repo = MessageRepository::new(pool_manager)
        .await
        .expect("Failed to create repository");
    (repo, dir)
}

/// **Test: a saved message comes back in the user's listing.**
///
/// **Setup:** Save one text message for "user-1".
/// **Action:** `list_for_user("user-1")`.
/// **Expected:** One record with the saved content and type.
#[tokio::test]
async fn test_save_and_list() {
    let (repo, _dir) = test_repo().await;

    let record = MessageRecord::new(
        "user-1".to_string(),
        Some("Hello World".to_string()),
        "text".to_string(),
        42,
    );
    repo.save(&record).await.expect("Failed to save message");

    let messages = repo.list_for_user("user-1").await.expect("Failed to list");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content.as_deref(), Some("Hello World"));
    assert_eq!(messages[0].message_type, "text");
    assert_eq!(messages[0].telegram_message_id, 42);
}

/// **Test: content may be absent for bare media messages.**
///
/// **Setup:** Save a photo message with no content.
/// **Action:** List.
/// **Expected:** One record with content None and type "photo".
#[tokio::test]
async fn test_save_without_content() {
    let (repo, _dir) = test_repo().await;

    let record = MessageRecord::new("user-1".to_string(), None, "photo".to_string(), 7);
    repo.save(&record).await.expect("Failed to save message");

    let messages = repo.list_for_user("user-1").await.expect("Failed to list");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].content.is_none());
    assert_eq!(messages[0].message_type, "photo");
}

/// **Test: listings are filtered by user.**
///
/// **Setup:** Save messages for two users.
/// **Action:** List each user.
/// **Expected:** Each listing carries only that user's messages.
#[tokio::test]
async fn test_list_filtered_by_user() {
    let (repo, _dir) = test_repo().await;

    for i in 0..3 {
        let record = MessageRecord::new(
            "user-1".to_string(),
            Some(format!("from one {}", i)),
            "text".to_string(),
            i,
        );
        repo.save(&record).await.expect("Failed to save message");
    }
    let record = MessageRecord::new(
        "user-2".to_string(),
        Some("from two".to_string()),
        "text".to_string(),
        99,
    );
    repo.save(&record).await.expect("Failed to save message");

    let one = repo.list_for_user("user-1").await.expect("Failed to list");
    let two = repo.list_for_user("user-2").await.expect("Failed to list");
    assert_eq!(one.len(), 3);
    assert_eq!(two.len(), 1);
    for msg in &one {
        assert_eq!(msg.user_id, "user-1");
    }
}
