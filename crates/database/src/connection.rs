use crate::error::DbError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// Reads `DATABASE_URL` from the environment, loading `.env` first if one is
/// present. The returned pool is shared across the whole application; ten
/// connections comfortably cover the read-only analytics workload.
pub async fn connect() -> Result<PgPool, DbError> {
    // The variable may come from the real environment instead of a .env file.
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_e| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;
    tracing::debug!("database pool established");

    Ok(pool)
}

/// Applies any pending database migrations.
///
/// Called at startup so a fresh deployment creates the `stocks` and
/// `monthly_prices` tables before the first query hits them.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
