//! Document-store access for the progress service.
//!
//! Handlers never talk to a connection directly. They go through the
//! [`ProgressStore`] trait, which has a PostgreSQL implementation
//! ([`PgStore`], JSONB columns behind sqlx repositories) and an in-memory
//! implementation ([`MemoryStore`]) with the same merge semantics.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use store::{PgStore, ProgressStore, StoreError, StoreResult};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// `database_name` overrides whatever database the URL names.
pub async fn create_pool(
    database_url: &str,
    database_name: &str,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.database(database_name);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Names of the document collections (tables) in the current schema.
///
/// sqlx's own bookkeeping table is left out.
pub async fn list_collections(pool: &DbPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = current_schema() \
           AND table_type = 'BASE TABLE' \
           AND table_name NOT LIKE '\\_sqlx%' \
         ORDER BY table_name",
    )
    .fetch_all(pool)
    .await
}
