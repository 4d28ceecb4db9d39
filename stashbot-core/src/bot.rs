//! Bot abstraction for outbound messages and delivery-endpoint management.
//!
//! [`Bot`] trait is transport-agnostic; [`TelegramBot`] implements it via
//! teloxide and additionally exposes webhook registration and the self
//! identity query used by the setup routes.

use crate::error::{Result, StashError};
use async_trait::async_trait;
use serde::Serialize;
use teloxide::{
    prelude::*,
    types::{ChatId, ParseMode},
};
use reqwest::Url;
use tracing::info;

/// Abstraction for sending messages. Implementations map to a transport
/// (e.g. Telegram); tests substitute a recording implementation.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a message rendered with Markdown emphasis.
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()>;
}

/// Bot identity as reported by the platform's self-identity query.
#[derive(Debug, Clone, Serialize)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
    pub first_name: String,
}

/// Teloxide-based implementation of [`Bot`].
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Creates a bot using the given Telegram bot token.
    pub fn new(token: String) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }

    /// Registers `url` as the delivery endpoint. When `secret` is set,
    /// Telegram echoes it back on every webhook call for authentication.
    pub async fn set_webhook(&self, url: &str, secret: Option<&str>) -> Result<()> {
        let parsed = Url::parse(url)
            .map_err(|e| StashError::InvalidCommand(format!("Invalid webhook URL: {}", e)))?;
        let mut request = self.bot.set_webhook(parsed);
        if let Some(secret) = secret {
            request = request.secret_token(secret.to_string());
        }
        request
            .await
            .map_err(|e| StashError::Transport(e.to_string()))?;
        info!(url, "Registered delivery endpoint");
        Ok(())
    }

    /// Removes the registered delivery endpoint.
    pub async fn delete_webhook(&self) -> Result<()> {
        self.bot
            .delete_webhook()
            .await
            .map_err(|e| StashError::Transport(e.to_string()))?;
        info!("Removed delivery endpoint");
        Ok(())
    }

    /// Queries the platform for this bot's own identity.
    pub async fn identity(&self) -> Result<BotIdentity> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| StashError::Transport(e.to_string()))?;
        Ok(BotIdentity {
            id: me.user.id.0 as i64,
            username: me.user.username.clone().unwrap_or_default(),
            first_name: me.user.first_name.clone(),
        })
    }
}

#[async_trait]
impl Bot for TelegramBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(|e| StashError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| StashError::Transport(e.to_string()))?;
        Ok(())
    }
}
