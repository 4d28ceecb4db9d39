//! # stashbot-core
//!
//! Core types and traits for the key/value storage bot: [`Bot`], the inbound
//! message model, the error taxonomy, and tracing initialization.
//! Transport-agnostic apart from the teloxide-backed [`TelegramBot`]; used by
//! stashbot-storage and stashbot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, BotIdentity, TelegramBot};
pub use error::{Result, StashError};
pub use logger::init_tracing;
pub use types::{IncomingMessage, MessageKind, Sender};
