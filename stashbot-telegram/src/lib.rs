//! # stashbot-telegram
//!
//! Integration crate for the key/value storage bot: environment
//! configuration, the inbound webhook wire types, the command dispatcher,
//! the axum HTTP server (webhook, setup, admin, health routes), and the
//! admin projection.

pub mod admin;
pub mod commands;
pub mod config;
pub mod server;
pub mod wire;

pub use commands::CommandDispatcher;
pub use config::BotConfig;
pub use server::{build_router, AppState};
pub use wire::UpdatePayload;
