use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ChatRoomId;

/// ChatRoom - a named room chats are posted into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatRoom {
    pub id: ChatRoomId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
