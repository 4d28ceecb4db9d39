//! Service configuration: token, webhook secret, database, bind address.
//! Loaded from environment variables BOT_TOKEN, WEBHOOK_SECRET, DATABASE_URL,
//! BIND_ADDR, LOG_FILE.

use stashbot_core::{Result, StashError};
use std::env;

/// Startup configuration. The bot token is required; everything else has a
/// default or is optional.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Shared secret Telegram echoes back on webhook calls; when set, calls
    /// without it are rejected before any processing.
    pub webhook_secret: Option<String>,
    pub database_url: String,
    pub bind_addr: String,
    pub log_file: Option<String>,
}

impl BotConfig {
    /// Loads configuration from the environment. Fails with a typed error
    /// when BOT_TOKEN is missing so startup can refuse to continue.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN")
            .map_err(|_| StashError::Config("BOT_TOKEN not set".to_string()))?;
        let webhook_secret = env::var("WEBHOOK_SECRET").ok();
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "stashbot.db".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            webhook_secret,
            database_url,
            bind_addr,
            log_file,
        })
    }

    /// Constructs a config with the given token and defaults for the rest.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            webhook_secret: None,
            database_url: "stashbot.db".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            log_file: None,
        }
    }
}
