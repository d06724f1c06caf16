//! Chat list filters.
//!
//! Each filter is optional; supplied filters combine with AND. The Postgres
//! store renders the same filter as `($n IS NULL OR ...)` clauses, so the
//! predicates here double as the reference for what SQL must return.

use serde::Deserialize;

use crate::common::search::{contains_ignore_case, contains_pattern, normalize_keyword};
use crate::common::{ChatRoomId, UserId};
use crate::domains::chatrooms::models::Chat;

/// Raw query-string filters. Unparseable ids are dropped, not rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatFilterQuery {
    pub body: Option<String>,
    pub chat_room_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatFilter {
    /// Trimmed, non-empty keyword matched against `message`
    pub body: Option<String>,
    pub chat_room_id: Option<ChatRoomId>,
    pub user_id: Option<UserId>,
}

impl From<ChatFilterQuery> for ChatFilter {
    fn from(query: ChatFilterQuery) -> Self {
        ChatFilter {
            body: normalize_keyword(query.body.as_deref()),
            chat_room_id: query
                .chat_room_id
                .and_then(|id| ChatRoomId::parse(id.trim()).ok()),
            user_id: query.user_id.and_then(|id| UserId::parse(id.trim()).ok()),
        }
    }
}

impl ChatFilter {
    pub fn with_body(mut self, keyword: &str) -> Self {
        self.body = normalize_keyword(Some(keyword));
        self
    }

    pub fn in_room(mut self, room: ChatRoomId) -> Self {
        self.chat_room_id = Some(room);
        self
    }

    pub fn by_user(mut self, user: UserId) -> Self {
        self.user_id = Some(user);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.chat_room_id.is_none() && self.user_id.is_none()
    }

    /// `ILIKE` pattern for the body keyword, wildcards escaped.
    pub fn body_pattern(&self) -> Option<String> {
        self.body.as_deref().map(contains_pattern)
    }

    pub fn matches(&self, chat: &Chat) -> bool {
        matches_body(chat, self.body.as_deref())
            && matches_room(chat, self.chat_room_id)
            && matches_user(chat, self.user_id)
    }
}

pub fn matches_body(chat: &Chat, keyword: Option<&str>) -> bool {
    keyword.map_or(true, |keyword| contains_ignore_case(&chat.message, keyword))
}

pub fn matches_room(chat: &Chat, room: Option<ChatRoomId>) -> bool {
    room.map_or(true, |room| chat.chat_room_id == Some(room))
}

pub fn matches_user(chat: &Chat, user: Option<UserId>) -> bool {
    user.map_or(true, |user| chat.user_id == Some(user))
}
