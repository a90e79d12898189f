//! Bot API payload types.

mod send;
mod update;

pub use send::{ApiResponse, SendMessageParams, SentMessage};
pub use update::{Chat, ChatId, Message, Update, User};
