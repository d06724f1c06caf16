use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::common::{ChatId, ChatRoomId, Meta, UserId};

/// Chat - a message posted into a room (or roomless, for system messages)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub uuid: Uuid, // public identifier, assigned once on insert
    pub chat_room_id: Option<ChatRoomId>,
    pub message: String,
    pub user_id: Option<UserId>, // null for system/anonymous messages
    pub meta: Option<Meta>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert parameters for a chat. `id` and `uuid` are generated here so the
/// store never has to.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct NewChat {
    #[builder(default = ChatId::new())]
    pub id: ChatId,
    #[builder(default = Uuid::new_v4())]
    pub uuid: Uuid,
    #[builder(default)]
    pub chat_room_id: Option<ChatRoomId>,
    pub message: String,
    #[builder(default)]
    pub user_id: Option<UserId>,
    #[builder(default)]
    pub meta: Option<Meta>,
}

impl NewChat {
    /// Materialize the row the store will hold, stamped at `now`.
    pub fn into_chat(self, now: DateTime<Utc>) -> Chat {
        Chat {
            id: self.id,
            uuid: self.uuid,
            chat_room_id: self.chat_room_id,
            message: self.message,
            user_id: self.user_id,
            meta: self.meta,
            created_at: now,
            updated_at: now,
        }
    }
}
