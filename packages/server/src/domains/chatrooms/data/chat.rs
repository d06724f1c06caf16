//! JSON shape of a chat.

use serde::Serialize;

use crate::common::Meta;
use crate::domains::chatrooms::models::Chat;

/// API representation of a chat. Nullable keys render as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatData {
    /// Internal identifier
    pub id: String,

    /// Public identifier
    pub uuid: String,

    pub chat_room_id: Option<String>,

    pub message: String,

    /// Author, if any
    pub user_id: Option<String>,

    /// Always an object; `{}` when the chat has no meta
    pub meta: Meta,

    /// RFC 3339
    pub created_at: String,

    /// RFC 3339
    pub updated_at: String,
}

impl From<Chat> for ChatData {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id.to_string(),
            uuid: chat.uuid.to_string(),
            chat_room_id: chat.chat_room_id.map(|id| id.to_string()),
            message: chat.message,
            user_id: chat.user_id.map(|id| id.to_string()),
            meta: chat.meta.unwrap_or_default(),
            created_at: chat.created_at.to_rfc3339(),
            updated_at: chat.updated_at.to_rfc3339(),
        }
    }
}
