use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::Result;

/// Opens a connection pool.
///
/// `min_connections` are kept open at all times; at most `max_connections`
/// are opened under load.
pub async fn connect(url: &str, min_connections: u32, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect(url)
        .await?;

    tracing::info!(min_connections, max_connections, "database pool ready");
    Ok(pool)
}

/// Creates the orders, payments and deliveries tables.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
