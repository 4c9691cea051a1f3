//! Memorial data access.
//!
//! Row models live in [`models`]; queries live in the zero-sized
//! repositories under [`repositories`]. Repository methods accept any
//! Postgres executor, so the same query runs against the pool or inside a
//! snapshot transaction opened with [`begin_snapshot`].

pub mod models;
pub mod repositories;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Postgres, Transaction};

pub type DbPool = sqlx::PgPool;

/// Transaction handle returned by [`begin_snapshot`].
pub type Snapshot = Transaction<'static, Postgres>;

/// Migrations embedded from `db/migrations` at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// How far the connected database is behind the embedded migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Up migrations embedded in this build.
    pub known: usize,
    /// Embedded migrations recorded as successfully applied.
    pub applied: usize,
}

impl MigrationStatus {
    pub fn pending(&self) -> usize {
        self.known - self.applied
    }

    pub fn is_current(&self) -> bool {
        self.pending() == 0
    }
}

/// Compare the embedded migrations against the `_sqlx_migrations` ledger.
///
/// Fails when the ledger table does not exist, i.e. migrations never ran.
pub async fn migration_status(pool: &DbPool) -> Result<MigrationStatus, sqlx::Error> {
    let recorded: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
            .fetch_all(pool)
            .await?;

    let mut known = 0;
    let mut applied = 0;
    for migration in MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
    {
        known += 1;
        if recorded.contains(&migration.version) {
            applied += 1;
        }
    }

    Ok(MigrationStatus { known, applied })
}

/// Open a read-only `REPEATABLE READ` transaction.
///
/// All reads issued through it observe the same snapshot, so a page
/// assembled from several queries is internally consistent. Dropping the
/// handle rolls the transaction back, which is all a read-only transaction
/// needs.
pub async fn begin_snapshot(pool: &DbPool) -> Result<Snapshot, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
