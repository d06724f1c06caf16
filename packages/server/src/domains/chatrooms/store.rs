//! Postgres chat store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::pagination::{PaginationDirection, ValidatedPaginationArgs};
use crate::common::{ChatId, ChatRoomId, Meta, StoreResult, UserId};
use crate::domains::chatrooms::filters::ChatFilter;
use crate::domains::chatrooms::models::{Chat, ChatRoom, NewChat};
use crate::kernel::BaseChatStore;

const CHAT_COLUMNS: &str =
    "id, uuid, chat_room_id, message, user_id, meta, created_at, updated_at";

/// Row shape of `chats`; `meta` is nullable JSONB.
#[derive(sqlx::FromRow)]
struct ChatRow {
    id: ChatId,
    uuid: Uuid,
    chat_room_id: Option<ChatRoomId>,
    message: String,
    user_id: Option<UserId>,
    meta: Option<Json<Meta>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChatRow> for Chat {
    fn from(row: ChatRow) -> Self {
        Chat {
            id: row.id,
            uuid: row.uuid,
            chat_room_id: row.chat_room_id,
            message: row.message,
            user_id: row.user_id,
            meta: row.meta.map(|Json(meta)| meta),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseChatStore for PgChatStore {
    async fn find_room(&self, id: ChatRoomId) -> StoreResult<Option<ChatRoom>> {
        let room = sqlx::query_as::<_, ChatRoom>(
            "SELECT id, name, created_at FROM chat_rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(room)
    }

    async fn insert_chat(&self, chat: NewChat) -> StoreResult<Chat> {
        let row = sqlx::query_as::<_, ChatRow>(&format!(
            r#"
            INSERT INTO chats (id, uuid, chat_room_id, message, user_id, meta)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(chat.id)
        .bind(chat.uuid)
        .bind(chat.chat_room_id)
        .bind(&chat.message)
        .bind(chat.user_id)
        .bind(chat.meta.map(Json))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_chat(&self, id: ChatId) -> StoreResult<Option<Chat>> {
        let row = sqlx::query_as::<_, ChatRow>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_chats(
        &self,
        filter: &ChatFilter,
        args: &ValidatedPaginationArgs,
    ) -> StoreResult<(Vec<Chat>, bool)> {
        let (cursor_op, order) = match args.direction {
            PaginationDirection::Forward => (">", "ASC"),
            PaginationDirection::Backward => ("<", "DESC"),
        };

        let rows = sqlx::query_as::<_, ChatRow>(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM chats
            WHERE ($1::text IS NULL OR message ILIKE $1 ESCAPE '\')
              AND ($2::uuid IS NULL OR chat_room_id = $2)
              AND ($3::uuid IS NULL OR user_id = $3)
              AND ($4::uuid IS NULL OR id {cursor_op} $4)
            ORDER BY id {order}
            LIMIT $5
            "#
        ))
        .bind(filter.body_pattern())
        .bind(filter.chat_room_id)
        .bind(filter.user_id)
        .bind(args.cursor)
        .bind(args.fetch_limit())
        .fetch_all(&self.pool)
        .await?;

        let has_more = rows.len() > args.limit as usize;
        let mut chats: Vec<Chat> = rows
            .into_iter()
            .take(args.limit as usize)
            .map(Into::into)
            .collect();
        if args.is_backward() {
            chats.reverse();
        }

        Ok((chats, has_more))
    }
}
