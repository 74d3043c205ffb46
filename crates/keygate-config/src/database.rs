//! Database connection pool initialization.
//!
//! The database URL is read from the `DATABASE_URL` environment variable.
//! The service cannot run without a database, so a missing variable or an
//! unreachable server is fatal at startup.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails. Call this
/// once during application startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
