//! Integration tests for [`stashbot_storage::DataEntryRepository`].
//!
//! Covers key lower-casing, in-place update on repeated saves, listing, and
//! delete-by-key using a temporary SQLite database.

use stashbot_storage::{DataEntryRepository, EntryType, SaveOutcome, SqlitePoolManager};
use tempfile::TempDir;

async fn test_repo() -> (DataEntryRepository, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let pool_manager = SqlitePoolManager::new(db_path.to_str().unwrap())
        .await
        .expect("Failed to create pool");
    let repo = DataEntryRepository::new(pool_manager)
        .await
        .expect("Failed to create repository");
    (repo, dir)
}

/// **Test: keys are lower-cased before storage.**
///
/// **Setup:** Empty DB.
/// **Action:** `save(u, "Email", "a@b.com")`, then `list_for_user(u)`.
/// **Expected:** One entry with key "email" and the original value.
#[tokio::test]
async fn test_save_lowercases_key() {
    let (repo, _dir) = test_repo().await;

    let outcome = repo
        .save("user-1", "Email", "a@b.com", EntryType::Custom)
        .await
        .expect("Failed to save entry");
    assert_eq!(outcome, SaveOutcome::Created);

    let entries = repo.list_for_user("user-1").await.expect("Failed to list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].data_key, "email");
    assert_eq!(entries[0].data_value, "a@b.com");
    assert_eq!(entries[0].data_type, "custom");
}

/// **Test: saving the same key twice updates the value in place.**
///
/// **Setup:** Save "k" with "v1".
/// **Action:** Save "k" with "v2", then list.
/// **Expected:** Second save reports Updated; exactly one entry for "k" with
/// value "v2" and an updated_at later than created_at.
#[tokio::test]
async fn test_save_updates_in_place() {
    let (repo, _dir) = test_repo().await;

    let first = repo
        .save("user-1", "k", "v1", EntryType::Custom)
        .await
        .expect("Failed to save entry");
    assert_eq!(first, SaveOutcome::Created);

    let second = repo
        .save("user-1", "k", "v2", EntryType::Custom)
        .await
        .expect("Failed to save entry");
    assert_eq!(second, SaveOutcome::Updated);

    let entries = repo.list_for_user("user-1").await.expect("Failed to list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].data_value, "v2");
    assert!(entries[0].updated_at >= entries[0].created_at);
}

/// **Test: lookup for update is case-insensitive.**
///
/// **Setup:** Save "phone".
/// **Action:** Save "PHONE" with a new value.
/// **Expected:** Updated outcome, still one entry.
#[tokio::test]
async fn test_save_case_insensitive_lookup() {
    let (repo, _dir) = test_repo().await;

    repo.save("user-1", "phone", "111", EntryType::Custom)
        .await
        .expect("Failed to save entry");
    let outcome = repo
        .save("user-1", "PHONE", "222", EntryType::Custom)
        .await
        .expect("Failed to save entry");

    assert_eq!(outcome, SaveOutcome::Updated);
    let entries = repo.list_for_user("user-1").await.expect("Failed to list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].data_value, "222");
}

/// **Test: entries are partitioned per user.**
///
/// **Setup:** Save the same key for two users.
/// **Action:** List each user.
/// **Expected:** Each user sees exactly their own entry.
#[tokio::test]
async fn test_entries_partitioned_by_user() {
    let (repo, _dir) = test_repo().await;

    repo.save("user-1", "email", "one@example.com", EntryType::Custom)
        .await
        .expect("Failed to save entry");
    repo.save("user-2", "email", "two@example.com", EntryType::Custom)
        .await
        .expect("Failed to save entry");

    let one = repo.list_for_user("user-1").await.expect("Failed to list");
    let two = repo.list_for_user("user-2").await.expect("Failed to list");
    assert_eq!(one.len(), 1);
    assert_eq!(two.len(), 1);
    assert_eq!(one[0].data_value, "one@example.com");
    assert_eq!(two[0].data_value, "two@example.com");
}

/// **Test: delete_by_key removes the entry and reports the count.**
///
/// **Setup:** Save "email".
/// **Action:** `delete_by_key(u, "EMAIL")` (different case), then list.
/// **Expected:** Returns 1; list is empty.
#[tokio::test]
async fn test_delete_by_key() {
    let (repo, _dir) = test_repo().await;

    repo.save("user-1", "email", "a@b.com", EntryType::Custom)
        .await
        .expect("Failed to save entry");

    let deleted = repo
        .delete_by_key("user-1", "EMAIL")
        .await
        .expect("Failed to delete");
    assert_eq!(deleted, 1);

    let entries = repo.list_for_user("user-1").await.expect("Failed to list");
    assert!(entries.is_empty());
}

/// **Test: deleting a missing key is a normal zero outcome.**
///
/// **Setup:** Empty DB.
/// **Action:** `delete_by_key(u, "missing")`.
/// **Expected:** Returns 0 without error.
#[tokio::test]
async fn test_delete_missing_key() {
    let (repo, _dir) = test_repo().await;

    let deleted = repo
        .delete_by_key("user-1", "missing")
        .await
        .expect("Failed to delete");
    assert_eq!(deleted, 0);
}

/// **Test: list returns entries newest first.**
///
/// **Setup:** Save three entries in order.
/// **Action:** `list_for_user(u)`.
/// **Expected:** Three entries, most recently created first.
#[tokio::test]
async fn test_list_newest_first() {
    let (repo, _dir) = test_repo().await;

    for key in ["first", "second", "third"] {
        repo.save("user-1", key, "v", EntryType::Custom)
            .await
            .expect("Failed to save entry");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let entries = repo.list_for_user("user-1").await.expect("Failed to list");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].data_key, "third");
    assert_eq!(entries[2].data_key, "first");
}
