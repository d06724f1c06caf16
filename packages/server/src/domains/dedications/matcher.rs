//! Postgres-backed dedication matcher, run after every chat insert.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::common::DedicationId;
use crate::domains::chatrooms::models::Chat;
use crate::kernel::{BaseClock, BaseDedicationMatcher};

/// Marks pending dedications as matched by a new chat.
///
/// Uses the same rule as [`SongDedication::matches_chat`], evaluated in SQL.
///
/// [`SongDedication::matches_chat`]: crate::domains::dedications::models::SongDedication::matches_chat
/// `matched_at` is read from the injected clock.
pub struct PgDedicationMatcher {
    pool: PgPool,
    clock: Arc<dyn BaseClock>,
}

impl PgDedicationMatcher {
    pub fn new(pool: PgPool, clock: Arc<dyn BaseClock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl BaseDedicationMatcher for PgDedicationMatcher {
    async fn match_chat(&self, chat: &Chat) -> Result<u64> {
        let matched = sqlx::query_scalar::<_, DedicationId>(
            r#"
            UPDATE song_dedications
            SET status = 'matched', matched_chat_id = $1, matched_at = $2
            WHERE status = 'pending'
              AND btrim(song_title) <> ''
              AND (chat_room_id IS NULL OR chat_room_id = $3)
              AND strpos(lower($4), lower(btrim(song_title))) > 0
            RETURNING id
            "#,
        )
        .bind(chat.id)
        .bind(self.clock.now())
        .bind(chat.chat_room_id)
        .bind(&chat.message)
        .fetch_all(&self.pool)
        .await
        .context("Failed to match song dedications")?;

        if !matched.is_empty() {
            info!(chat_id = %chat.id, matched = matched.len(), "Song dedications matched");
        }

        Ok(matched.len() as u64)
    }
}
