//! Inbound webhook wire types: the Telegram update envelope, reduced to the
//! fields the dispatcher needs. Media payloads are kept only long enough to
//! classify the message kind; the raw content is dropped here.

use serde::Deserialize;
use serde_json::Value;
use stashbot_core::{IncomingMessage, MessageKind, Sender};

/// One update pushed by Telegram: at most one of `message` /
/// `edited_message` is handled; both route through the same dispatcher.
#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub update_id: i64,
    pub message: Option<MessagePayload>,
    pub edited_message: Option<MessagePayload>,
}

impl UpdatePayload {
    /// The message carried by this update, new or edited.
    pub fn into_message(self) -> Option<MessagePayload> {
        self.message.or(self.edited_message)
    }
}

#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub message_id: i64,
    pub from: Option<SenderPayload>,
    pub chat: ChatPayload,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub photo: Option<Value>,
    pub document: Option<Value>,
    pub voice: Option<Value>,
    pub video: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SenderPayload {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    pub id: i64,
}

impl MessagePayload {
    /// Classifies the message into the closed kind set. Media wins over
    /// text so captioned media keeps its media kind.
    pub fn kind(&self) -> MessageKind {
        if self.photo.is_some() {
            MessageKind::Photo
        } else if self.document.is_some() {
            MessageKind::Document
        } else if self.voice.is_some() {
            MessageKind::Voice
        } else if self.video.is_some() {
            MessageKind::Video
        } else if self.text.is_some() {
            MessageKind::Text
        } else {
            MessageKind::Other
        }
    }

    /// Converts to the core message model, dropping raw media payloads.
    pub fn into_incoming(self) -> IncomingMessage {
        let kind = self.kind();
        IncomingMessage {
            external_id: self.message_id,
            chat_id: self.chat.id,
            sender: self.from.map(|from| Sender {
                id: from.id,
                username: from.username,
                first_name: from.first_name,
                last_name: from.last_name,
                is_bot: from.is_bot,
                language_code: from.language_code,
            }),
            text: self.text,
            caption: self.caption,
            kind,
        }
    }
}
