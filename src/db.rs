use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::config::Config;
use crate::error::AppError;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Build the connection pool from the process configuration and bring the
/// schema up to date.
pub fn init_pool(config: &Config) -> Result<DbPool, Box<dyn std::error::Error + Send + Sync>> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build(manager)?;

    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;

    Ok(pool)
}

/// Helper function to get a pooled DB connection.
pub fn get_conn(pool: &DbPool) -> Result<DbConn, AppError> {
    pool.get().map_err(|_| AppError::Pool)
}
