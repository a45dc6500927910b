use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Single-session CRM traffic: a small pool is plenty.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await
}
