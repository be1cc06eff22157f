//! Database connection pool using the `OnceCell` pattern.

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::error::ApiError;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Schema migrations for the portal tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Get or initialize the database connection pool from `DATABASE_URL`.
pub async fn get_pool() -> Result<&'static PgPool, ApiError> {
    POOL.get_or_try_init(|| async {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ApiError::Config("DATABASE_URL must be set".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;
        Ok::<_, ApiError>(pool)
    })
    .await
}
