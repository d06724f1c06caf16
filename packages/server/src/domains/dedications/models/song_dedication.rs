use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{ChatId, ChatRoomId, DedicationId, UserId};
use crate::domains::chatrooms::models::Chat;

/// SongDedication - a listener's request to have a song played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDedication {
    pub id: DedicationId,
    pub chat_room_id: Option<ChatRoomId>, // null = any room
    pub song_title: String,
    pub requested_by: Option<UserId>,
    pub status: DedicationStatus,
    pub matched_chat_id: Option<ChatId>,
    pub matched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SongDedication {
    pub fn pending(chat_room_id: Option<ChatRoomId>, song_title: impl Into<String>) -> Self {
        Self {
            id: DedicationId::new(),
            chat_room_id,
            song_title: song_title.into(),
            requested_by: None,
            status: DedicationStatus::Pending,
            matched_chat_id: None,
            matched_at: None,
            created_at: Utc::now(),
        }
    }

    /// A pending dedication matches a chat posted in its room (or any room,
    /// when it has none) whose message mentions the song title.
    pub fn matches_chat(&self, chat: &Chat) -> bool {
        let title = self.song_title.trim();
        self.status == DedicationStatus::Pending
            && !title.is_empty()
            && self
                .chat_room_id
                .map_or(true, |room| chat.chat_room_id == Some(room))
            && chat.message.to_lowercase().contains(&title.to_lowercase())
    }

    pub fn mark_matched(&mut self, chat_id: ChatId, at: DateTime<Utc>) {
        self.status = DedicationStatus::Matched;
        self.matched_chat_id = Some(chat_id);
        self.matched_at = Some(at);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DedicationStatus {
    Pending,
    Matched,
}

impl std::fmt::Display for DedicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedicationStatus::Pending => write!(f, "pending"),
            DedicationStatus::Matched => write!(f, "matched"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::chatrooms::models::NewChat;

    fn chat(message: &str, room: Option<ChatRoomId>) -> Chat {
        NewChat::builder()
            .message(message)
            .chat_room_id(room)
            .build()
            .into_chat(Utc::now())
    }

    #[test]
    fn matches_title_in_same_room() {
        let room = ChatRoomId::new();
        let dedication = SongDedication::pending(Some(room), "Imagine");

        assert!(dedication.matches_chat(&chat("please play imagine for Ana", Some(room))));
        assert!(!dedication.matches_chat(&chat("please play imagine", Some(ChatRoomId::new()))));
        assert!(!dedication.matches_chat(&chat("please play imagine", None)));
    }

    #[test]
    fn roomless_dedication_matches_any_room() {
        let dedication = SongDedication::pending(None, "Yesterday");
        assert!(dedication.matches_chat(&chat("Yesterday please", Some(ChatRoomId::new()))));
        assert!(dedication.matches_chat(&chat("yesterday!", None)));
    }

    #[test]
    fn blank_titles_and_matched_rows_never_match() {
        let blank = SongDedication::pending(None, "  ");
        assert!(!blank.matches_chat(&chat("anything", None)));

        let mut done = SongDedication::pending(None, "Imagine");
        done.mark_matched(ChatId::new(), Utc::now());
        assert!(!done.matches_chat(&chat("imagine", None)));
    }
}
