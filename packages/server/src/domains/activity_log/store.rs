use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::activity_log::models::NewActivity;
use crate::kernel::BaseActivityLog;

/// Writes audit entries to the `activity_log` table.
pub struct PgActivityLog {
    pool: PgPool,
}

impl PgActivityLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseActivityLog for PgActivityLog {
    async fn record(&self, entry: NewActivity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_log
                (id, log_name, description, event, subject_id, causer_id, properties)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.log_name.as_str())
        .bind(entry.description())
        .bind(entry.event.as_str())
        .bind(entry.subject_id)
        .bind(entry.causer_id)
        .bind(sqlx::types::Json(&entry.properties))
        .execute(&self.pool)
        .await
        .context("Failed to write activity log entry")?;

        Ok(())
    }
}
