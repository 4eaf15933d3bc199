//! SQLite pool and embedded migrations.

use std::str::FromStr;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};

use crate::config::Config;

/// Reversible migrations from `migrations/`, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
}

/// Single-connection pool over a private in-memory database, migrated.
/// Each `:memory:` connection is its own database, hence one connection that
/// never expires.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
