//! Command dispatcher: parses inbound text into a command, resolves the
//! user, logs the message, and routes to the matching handler.
//!
//! Failures in steps 2–4 are contained here: the chat always gets a reply
//! (or, for textless messages, a silent no-op) and the webhook call is never
//! answered with a raw error.

use chrono::Utc;
use stashbot_core::{Bot, IncomingMessage, Result, Sender, StashError};
use stashbot_storage::{
    DataEntryRepository, EntryType, MessageRecord, MessageRepository, SaveOutcome, UserRepository,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const GENERIC_ERROR: &str = "Sorry, something went wrong. Please try again later.";
const NO_USER_INFO: &str = "User information not available.";
const UNKNOWN_COMMAND: &str = "Unknown command. Use /help to see available commands.";
const SAVE_USAGE: &str =
    "Please provide both a key and value.\nExample: `/save email john@example.com`";
const DELETE_USAGE: &str = "Please specify the key to delete.\nExample: `/delete email`";
const EMPTY_LIST: &str =
    "📝 You have no saved data yet.\n\nUse `/save <key> <value>` to store some data!";
const NOTE_SAVED: &str = "📝 Saved your note!\n\nUse /list to view all saved data.";

const HELP_MESSAGE: &str = "📖 **Available Commands:**\n\n\
• **/start** - Get welcome message and setup\n\
• **/help** - Show this help message\n\
• **/save <key> <value>** - Save data with a specific key\n  \
Example: `/save email john@example.com`\n\
• **/list** - View all your saved data\n\
• **/delete <key>** - Delete specific data by key\n\n\
You can also send me any text message and I'll save it as a note automatically!\n\n\
💡 **Tips:**\n\
- Keys should be single words (no spaces)\n\
- Use descriptive keys like 'email', 'phone', 'address'\n\
- Data is private to your account only";

/// Routes one inbound message through identity resolution, message logging,
/// and the command handlers. Holds no state across invocations.
#[derive(Clone)]
pub struct CommandDispatcher {
    bot: Arc<dyn Bot>,
    users: UserRepository,
    messages: MessageRepository,
    entries: DataEntryRepository,
}

impl CommandDispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        users: UserRepository,
        messages: MessageRepository,
        entries: DataEntryRepository,
    ) -> Self {
        Self {
            bot,
            users,
            messages,
            entries,
        }
    }

    /// Handles one inbound message. Textless and blank messages end
    /// silently; any failure during processing is logged and answered with a
    /// single generic apology.
    #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
    pub async fn dispatch(&self, message: &IncomingMessage) -> Result<()> {
        let Some(text) = message.text.clone() else {
            return Ok(());
        };
        let text = text.trim().to_string();
        if text.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.process(message, &text).await {
            error!(error = %e, chat_id = message.chat_id, "Command handling failed");
            self.bot.send_message(message.chat_id, GENERIC_ERROR).await?;
        }
        Ok(())
    }

    async fn process(&self, message: &IncomingMessage, text: &str) -> Result<()> {
        let user_id = match &message.sender {
            Some(sender) => Some(self.ensure_user(sender).await?),
            None => None,
        };

        // Best-effort: the message log never blocks command handling.
        if let Some(user_id) = &user_id {
            let record = MessageRecord::new(
                user_id.clone(),
                message.content().map(str::to_string),
                message.kind.as_str().to_string(),
                message.external_id,
            );
            if let Err(e) = self.messages.save(&record).await {
                warn!(error = %e, user_id = %user_id, "Failed to store message");
            }
        }

        let command = text
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match command.as_str() {
            "/start" => self.handle_start(message).await,
            "/help" => self.handle_help(message.chat_id).await,
            "/save" => self.handle_save(message.chat_id, text, user_id.as_deref()).await,
            "/list" => self.handle_list(message.chat_id, user_id.as_deref()).await,
            "/delete" => {
                self.handle_delete(message.chat_id, text, user_id.as_deref())
                    .await
            }
            _ if !text.starts_with('/') => {
                self.handle_note(message.chat_id, text, user_id.as_deref())
                    .await
            }
            _ => self.bot.send_message(message.chat_id, UNKNOWN_COMMAND).await,
        }
    }

    async fn ensure_user(&self, sender: &Sender) -> Result<String> {
        self.users
            .ensure(
                sender.id,
                sender.username.as_deref(),
                &sender.first_name,
                sender.last_name.as_deref(),
                sender.is_bot,
                sender.language_code.as_deref(),
            )
            .await
            .map_err(|e| StashError::Database(e.to_string()))
    }

    async fn handle_start(&self, message: &IncomingMessage) -> Result<()> {
        let name = message
            .sender
            .as_ref()
            .map(|sender| sender.first_name.as_str())
            .unwrap_or("there");

        let welcome = format!(
            "🎉 Welcome to the Data Storage Bot!\n\n\
Hello {}! I'm here to help you store and manage your data.\n\n\
Available commands:\n\
• /help - Show this help message\n\
• /save <key> <value> - Save data with a key\n\
• /list - View all your saved data\n\
• /delete <key> - Delete specific data\n\n\
You can also just send me any text and I'll store it as a note!\n\n\
Let's get started! 🚀",
            name
        );

        self.bot.send_message(message.chat_id, &welcome).await
    }

    async fn handle_help(&self, chat_id: i64) -> Result<()> {
        self.bot.send_markdown(chat_id, HELP_MESSAGE).await
    }

    async fn handle_save(&self, chat_id: i64, text: &str, user_id: Option<&str>) -> Result<()> {
        let Some(user_id) = user_id else {
            return self.bot.send_message(chat_id, NO_USER_INFO).await;
        };

        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() < 3 {
            return self.bot.send_markdown(chat_id, SAVE_USAGE).await;
        }

        let key = parts[1].to_lowercase();
        let value = parts[2..].join(" ");

        let outcome = self
            .entries
            .save(user_id, &key, &value, EntryType::Custom)
            .await
            .map_err(|e| StashError::Database(e.to_string()))?;

        info!(user_id, key = %key, ?outcome, "step: /save handled");

        let reply = match outcome {
            SaveOutcome::Created => format!("✅ Saved **{}**: {}", key, value),
            SaveOutcome::Updated => format!("✅ Updated **{}** with new value!", key),
        };
        self.bot.send_markdown(chat_id, &reply).await
    }

    async fn handle_list(&self, chat_id: i64, user_id: Option<&str>) -> Result<()> {
        let Some(user_id) = user_id else {
            return self.bot.send_message(chat_id, NO_USER_INFO).await;
        };

        let entries = self
            .entries
            .list_for_user(user_id)
            .await
            .map_err(|e| StashError::Database(e.to_string()))?;

        if entries.is_empty() {
            return self.bot.send_markdown(chat_id, EMPTY_LIST).await;
        }

        let mut reply = String::from("📋 **Your Saved Data:**\n\n");
        for (index, entry) in entries.iter().enumerate() {
            reply.push_str(&format!(
                "{}. **{}**: {}\n",
                index + 1,
                entry.data_key,
                entry.data_value
            ));
        }
        reply.push_str(&format!("\n💾 Total items: {}", entries.len()));

        self.bot.send_markdown(chat_id, &reply).await
    }

    async fn handle_delete(&self, chat_id: i64, text: &str, user_id: Option<&str>) -> Result<()> {
        let Some(user_id) = user_id else {
            return self.bot.send_message(chat_id, NO_USER_INFO).await;
        };

        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() < 2 {
            return self.bot.send_markdown(chat_id, DELETE_USAGE).await;
        }

        let key = parts[1].to_lowercase();
        let deleted = self
            .entries
            .delete_by_key(user_id, &key)
            .await
            .map_err(|e| StashError::Database(e.to_string()))?;

        let reply = if deleted > 0 {
            format!("🗑️ Deleted **{}** successfully!", key)
        } else {
            format!("❌ No data found with key **{}**", key)
        };
        self.bot.send_markdown(chat_id, &reply).await
    }

    /// Free-form text becomes a note with a timestamp-derived key, so it
    /// cannot collide with a previously captured note.
    async fn handle_note(&self, chat_id: i64, text: &str, user_id: Option<&str>) -> Result<()> {
        let Some(user_id) = user_id else {
            return self.bot.send_message(chat_id, NO_USER_INFO).await;
        };

        let key = format!("note_{}", Utc::now().timestamp_micros());
        self.entries
            .save(user_id, &key, text, EntryType::Note)
            .await
            .map_err(|e| StashError::Database(e.to_string()))?;

        info!(user_id, key = %key, "step: note captured");
        self.bot.send_message(chat_id, NOTE_SAVED).await
    }
}
