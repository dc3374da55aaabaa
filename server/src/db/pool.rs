//! Database connection pool management.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Type alias for the database pool.
pub type Pool = SqlitePool;

/// Create a new database connection pool.
///
/// In-memory databases live per connection, so they get a single connection
/// that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<Pool, sqlx::Error> {
    if database_url.contains(":memory:") {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &Pool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
