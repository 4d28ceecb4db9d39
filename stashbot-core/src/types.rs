//! Core types: sender identity, inbound message, and message kind.

use serde::{Deserialize, Serialize};

/// Sender identity as reported by the messaging platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    /// The platform's stable numeric account id.
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub language_code: Option<String>,
}

/// Kind of an inbound message. Only the discriminator is retained; raw media
/// payloads are dropped at the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Text,
    Photo,
    Document,
    Voice,
    Video,
    Other,
}

impl MessageKind {
    /// Stable tag used for persistence and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Photo => "photo",
            MessageKind::Document => "document",
            MessageKind::Voice => "voice",
            MessageKind::Video => "video",
            MessageKind::Other => "other",
        }
    }
}

/// A single inbound message, already stripped to what the dispatcher needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// The platform's message id within the chat.
    pub external_id: i64,
    pub chat_id: i64,
    /// Absent for e.g. channel posts; handlers that need a user reply with a
    /// hint instead of failing.
    pub sender: Option<Sender>,
    pub text: Option<String>,
    /// Caption of a media message; logged in place of text when present.
    pub caption: Option<String>,
    pub kind: MessageKind,
}

impl IncomingMessage {
    /// Text or caption, whichever is present, for the message log.
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }
}
