//! Shared test fixtures: a recording [`stashbot_core::Bot`] and a dispatcher
//! wired to a temporary SQLite database.

use async_trait::async_trait;
use stashbot_core::{Bot, Result};
use stashbot_storage::{
    DataEntryRepository, MessageRepository, SqlitePoolManager, UserRepository,
};
use stashbot_telegram::CommandDispatcher;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// One recorded outbound message.
#[derive(Debug, Clone)]
#[allow(dead_code)] // chat_id kept for future assertions
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub markdown: bool,
}

/// Mock Bot that records every send instead of hitting Telegram.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|m| m.text.clone())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            markdown: false,
        });
        Ok(())
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            markdown: true,
        });
        Ok(())
    }
}

/// Everything a dispatcher test needs; `_dir` keeps the database alive.
pub struct TestHarness {
    pub dispatcher: CommandDispatcher,
    pub bot: Arc<RecordingBot>,
    pub users: UserRepository,
    pub messages: MessageRepository,
    pub entries: DataEntryRepository,
    pub _dir: TempDir,
}

/// Builds a dispatcher over a fresh temporary database and a recording bot.
pub async fn harness() -> TestHarness {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let pool_manager = SqlitePoolManager::new(db_path.to_str().unwrap())
        .await
        .expect("Failed to create pool");

    let users = UserRepository::new(pool_manager.clone())
        .await
        .expect("Failed to create user repository");
    let messages = MessageRepository::new(pool_manager.clone())
        .await
        .expect("Failed to create message repository");
    let entries = DataEntryRepository::new(pool_manager)
        .await
        .expect("Failed to create data repository");

    let bot = RecordingBot::new();
    let dispatcher = CommandDispatcher::new(
        bot.clone(),
        users.clone(),
        messages.clone(),
        entries.clone(),
    );

    TestHarness {
        dispatcher,
        bot,
        users,
        messages,
        entries,
        _dir: dir,
    }
}
