//! PostgreSQL persistence for the FitClub backend: connection pooling,
//! schema initialization, and one repository module per aggregate.

pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::debug;

pub type DbPool = Pool<Postgres>;

/// Connects a bounded pool to the given database. `DATABASE_MAX_CONNECTIONS`
/// overrides the default pool size.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5);

    debug!("Connecting database pool (max_connections={max_connections})");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
