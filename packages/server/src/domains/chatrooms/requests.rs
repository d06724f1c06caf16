use serde::Deserialize;
use serde_json::Value;

use crate::common::{ChatRoomId, Meta, ValidationErrors};

pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Body of `POST /api/chats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPayload {
    pub message: Option<String>,
    pub chat_room_id: Option<String>,
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidChat {
    pub message: String,
    pub chat_room_id: Option<ChatRoomId>,
    pub meta: Option<Meta>,
}

impl ChatPayload {
    pub fn validate(self) -> Result<ValidChat, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let message = self.message.filter(|m| !m.trim().is_empty());
        match &message {
            None => errors.add("message", "The message field is required."),
            Some(m) if m.chars().count() > MAX_MESSAGE_CHARS => errors.add(
                "message",
                format!("The message may not be greater than {MAX_MESSAGE_CHARS} characters."),
            ),
            Some(_) => {}
        }

        let chat_room_id = match self.chat_room_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match ChatRoomId::parse(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("chat_room_id", "The selected chat room id is invalid.");
                    None
                }
            },
        };

        let meta = match self.meta {
            None | Some(Value::Null) => None,
            Some(value) => match Meta::try_from(value) {
                Ok(meta) => Some(meta),
                Err(_) => {
                    errors.add("meta", "The meta must be an object.");
                    None
                }
            },
        };

        errors.into_result()?;

        match message {
            Some(message) => Ok(ValidChat {
                message,
                chat_room_id,
                meta,
            }),
            None => Err(ValidationErrors::single(
                "message",
                "The message field is required.",
            )),
        }
    }
}
