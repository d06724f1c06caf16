//! Postgres e-bazaar store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::pagination::{PaginationDirection, ValidatedPaginationArgs};
use crate::common::{EBazaarId, MediaId, StoreError, StoreResult, UserId};
use crate::domains::ebazaar::filters::EBazaarFilter;
use crate::domains::ebazaar::models::{
    EBazaar, EBazaarChanges, Media, NewEBazaar, NewMedia, Order, OrderWithCustomer,
};
use crate::domains::member::User;
use crate::kernel::BaseEBazaarStore;

const EBAZAAR_COLUMNS: &str = "id, uuid, title, description, category, location, \
     start_at, end_at, created_by, created_at, updated_at";

const MEDIA_COLUMNS: &str =
    "id, ebazaar_id, kind, file_name, mime_type, size_bytes, path, url, position, created_at";

pub struct PgEBazaarStore {
    pool: PgPool,
}

impl PgEBazaarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_media<'e, E>(executor: E, media: &NewMedia) -> StoreResult<Media>
where
    E: sqlx::PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, Media>(&format!(
        r#"
        INSERT INTO ebazaar_media
            (id, ebazaar_id, kind, file_name, mime_type, size_bytes, path, url, position)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM ebazaar_media WHERE ebazaar_id = $2))
        RETURNING {MEDIA_COLUMNS}
        "#
    ))
    .bind(media.id)
    .bind(media.ebazaar_id)
    .bind(media.kind.as_str())
    .bind(&media.file_name)
    .bind(&media.mime_type)
    .bind(media.size_bytes)
    .bind(&media.path)
    .bind(&media.url)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

#[async_trait]
impl BaseEBazaarStore for PgEBazaarStore {
    async fn list(
        &self,
        filter: &EBazaarFilter,
        args: &ValidatedPaginationArgs,
    ) -> StoreResult<(Vec<EBazaar>, bool)> {
        let (cursor_op, order) = match args.direction {
            PaginationDirection::Forward => (">", "ASC"),
            PaginationDirection::Backward => ("<", "DESC"),
        };

        let rows = sqlx::query_as::<_, EBazaar>(&format!(
            r#"
            SELECT {EBAZAAR_COLUMNS} FROM ebazaars
            WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\')
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR location = $3)
              AND ($4::uuid IS NULL OR id {cursor_op} $4)
            ORDER BY id {order}
            LIMIT $5
            "#
        ))
        .bind(filter.search_pattern())
        .bind(&filter.category)
        .bind(&filter.location)
        .bind(args.cursor)
        .bind(args.fetch_limit())
        .fetch_all(&self.pool)
        .await?;

        let has_more = rows.len() > args.limit as usize;
        let mut rows: Vec<EBazaar> = rows.into_iter().take(args.limit as usize).collect();
        if args.is_backward() {
            rows.reverse();
        }

        Ok((rows, has_more))
    }

    async fn find(&self, id: EBazaarId) -> StoreResult<Option<EBazaar>> {
        let row = sqlx::query_as::<_, EBazaar>(&format!(
            "SELECT {EBAZAAR_COLUMNS} FROM ebazaars WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, ebazaar: NewEBazaar, media: Vec<NewMedia>) -> StoreResult<EBazaar> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EBazaar>(&format!(
            r#"
            INSERT INTO ebazaars
                (id, uuid, title, description, category, location, start_at, end_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {EBAZAAR_COLUMNS}
            "#
        ))
        .bind(ebazaar.id)
        .bind(ebazaar.uuid)
        .bind(&ebazaar.title)
        .bind(&ebazaar.description)
        .bind(&ebazaar.category)
        .bind(&ebazaar.location)
        .bind(ebazaar.start_at)
        .bind(ebazaar.end_at)
        .bind(ebazaar.created_by)
        .fetch_one(&mut *tx)
        .await?;

        for item in &media {
            insert_media(&mut *tx, item).await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    async fn update(&self, id: EBazaarId, changes: EBazaarChanges) -> StoreResult<EBazaar> {
        let row = sqlx::query_as::<_, EBazaar>(&format!(
            r#"
            UPDATE ebazaars
            SET title = $2, description = $3, category = $4, location = $5,
                start_at = $6, end_at = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {EBAZAAR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.category)
        .bind(&changes.location)
        .bind(changes.start_at)
        .bind(changes.end_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: EBazaarId) -> StoreResult<Vec<Media>> {
        let mut tx = self.pool.begin().await?;

        let media = sqlx::query_as::<_, Media>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM ebazaar_media WHERE ebazaar_id = $1 ORDER BY position, id"
        ))
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        // media and saves go with the row (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM ebazaars WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(media)
    }

    async fn media_for(&self, ids: &[EBazaarId]) -> StoreResult<Vec<Media>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, Media>(&format!(
            r#"
            SELECT {MEDIA_COLUMNS} FROM ebazaar_media
            WHERE ebazaar_id = ANY($1)
            ORDER BY ebazaar_id, position, id
            "#
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn add_media(&self, media: NewMedia) -> StoreResult<Media> {
        let mut tx = self.pool.begin().await?;

        // Serializes position assignment per e-bazaar
        sqlx::query("SELECT id FROM ebazaars WHERE id = $1 FOR UPDATE")
            .bind(media.ebazaar_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;

        let row = insert_media(&mut *tx, &media).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn remove_media(&self, ebazaar_id: EBazaarId, media_id: MediaId) -> StoreResult<Media> {
        let row = sqlx::query_as::<_, Media>(&format!(
            "DELETE FROM ebazaar_media WHERE id = $1 AND ebazaar_id = $2 RETURNING {MEDIA_COLUMNS}"
        ))
        .bind(media_id)
        .bind(ebazaar_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound)
    }

    async fn orders_with_customers(&self, id: EBazaarId) -> StoreResult<Vec<OrderWithCustomer>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, ebazaar_id, customer_id, quantity, total_cents, status, created_at
            FROM ebazaar_orders
            WHERE ebazaar_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut customer_ids: Vec<UserId> = orders.iter().map(|o| o.customer_id).collect();
        customer_ids.sort();
        customer_ids.dedup();

        let customers: HashMap<UserId, User> = User::find_by_ids(&customer_ids, &self.pool)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| OrderWithCustomer {
                customer: customers.get(&order.customer_id).cloned(),
                order,
            })
            .collect())
    }

    async fn live_at(&self, now: DateTime<Utc>) -> StoreResult<Vec<EBazaar>> {
        let rows = sqlx::query_as::<_, EBazaar>(&format!(
            r#"
            SELECT {EBAZAAR_COLUMNS} FROM ebazaars
            WHERE start_at <= $1 AND end_at >= $1
            ORDER BY start_at, id
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<EBazaar>> {
        let rows = sqlx::query_as::<_, EBazaar>(&format!(
            r#"
            SELECT {EBAZAAR_COLUMNS} FROM ebazaars
            WHERE start_at >= $1 AND start_at < $2
            ORDER BY start_at, id
            "#
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn toggle_save(&self, id: EBazaarId, user_id: UserId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM ebazaar_saves WHERE ebazaar_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let saved = if removed > 0 {
            false
        } else {
            sqlx::query("INSERT INTO ebazaar_saves (ebazaar_id, user_id) VALUES ($1, $2)")
                .bind(id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            true
        };

        tx.commit().await?;
        Ok(saved)
    }
}
