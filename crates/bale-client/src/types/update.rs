//! Inbound update types delivered to the webhook.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An update pushed by the platform.
///
/// Only text messages matter here; every other field is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    /// Update sequence number.
    #[serde(default)]
    pub update_id: Option<i64>,

    /// New incoming message, if this update carries one.
    #[serde(default)]
    pub message: Option<Message>,
}

/// An incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message ID within the chat.
    #[serde(default)]
    pub message_id: Option<i64>,

    /// Sender, when present.
    #[serde(default)]
    pub from: Option<User>,

    /// Chat the message belongs to.
    pub chat: Chat,

    /// Text body. Absent for stickers, photos, and the like.
    #[serde(default)]
    pub text: Option<String>,
}

/// Message sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: ChatId,
    /// Display name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Username without `@`.
    #[serde(default)]
    pub username: Option<String>,
}

/// Chat reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Chat ID.
    pub id: ChatId,
}

/// Chat identifier. The platform sends integers, but strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Int(id) => write!(f, "{}", id),
            ChatId::Str(id) => f.write_str(id),
        }
    }
}

impl From<ChatId> for String {
    fn from(id: ChatId) -> Self {
        id.to_string()
    }
}

impl Update {
    /// Chat ID and trimmed text of a text message, if this update has one.
    ///
    /// Empty or whitespace-only text counts as no text.
    pub fn text_message(&self) -> Option<(String, &str)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?.trim();
        if text.is_empty() {
            return None;
        }
        Some((message.chat.id.to_string(), text))
    }
}
