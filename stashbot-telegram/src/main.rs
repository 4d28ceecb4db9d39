//! Binary for the webhook-driven key/value bot: loads configuration,
//! initializes storage and the Telegram client, and serves the HTTP routes.

use anyhow::Result;
use stashbot_core::{init_tracing, TelegramBot};
use stashbot_storage::{
    DataEntryRepository, MessageRepository, SqlitePoolManager, UserRepository,
};
use stashbot_telegram::{build_router, AppState, BotConfig, CommandDispatcher};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_tracing(config.log_file.as_deref())?;

    let pool_manager = SqlitePoolManager::new(&config.database_url).await?;
    let users = UserRepository::new(pool_manager.clone()).await?;
    let messages = MessageRepository::new(pool_manager.clone()).await?;
    let entries = DataEntryRepository::new(pool_manager).await?;

    let api = Arc::new(TelegramBot::new(config.bot_token.clone()));
    let dispatcher = CommandDispatcher::new(
        api.clone(),
        users.clone(),
        messages.clone(),
        entries.clone(),
    );

    let state = AppState {
        dispatcher,
        api,
        users,
        entries,
        messages,
        webhook_secret: config.webhook_secret.clone(),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "stashbot listening");
    axum::serve(listener, app).await?;

    Ok(())
}
