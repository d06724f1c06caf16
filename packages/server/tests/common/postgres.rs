//! Postgres harness for the store tests.
//!
//! One container is started per test binary and reused. Every harness gets
//! its own freshly migrated database inside it, so store tests can count
//! rows without stepping on each other.

use anyhow::{Context, Result};
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::init_tracing;

struct SharedPostgres {
    /// Server URL without a database name
    server_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

impl SharedPostgres {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;

        Ok(Self {
            server_url: format!("postgresql://postgres:postgres@{host}:{port}"),
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_POSTGRES
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared Postgres container")
            })
            .await
    }
}

/// A migrated database of its own, backed by the shared container.
pub struct PgHarness {
    pub pool: PgPool,
}

impl PgHarness {
    pub async fn new() -> Self {
        Self::create().await.expect("Failed to create test database")
    }

    async fn create() -> Result<Self> {
        let shared = SharedPostgres::get().await;
        let database = format!("playday_test_{}", Uuid::new_v4().simple());

        let mut admin = PgConnection::connect(&format!("{}/postgres", shared.server_url))
            .await
            .context("Failed to connect to the admin database")?;
        sqlx::raw_sql(&format!(r#"CREATE DATABASE "{database}""#))
            .execute(&mut admin)
            .await
            .with_context(|| format!("Failed to create database {database}"))?;
        admin.close().await?;

        let pool = PgPool::connect(&format!("{}/{database}", shared.server_url))
            .await
            .context("Failed to connect to the test database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self { pool })
    }
}
