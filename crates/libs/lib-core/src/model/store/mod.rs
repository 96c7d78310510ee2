//! # Database Store
//!
//! Database connection pool, embedded migrations, and repository implementations.

// region: --- Modules
pub mod account_repository;
pub mod merchant_repository;
pub mod product_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use account_repository::AccountRepository;
pub use merchant_repository::MerchantRepository;
pub use product_repository::ProductRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use std::str::FromStr;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations from `lib-core/migrations`, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a new SQLite connection pool for `database_url`.
///
/// The database file is created if missing and foreign keys are enforced.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePool::connect_with(options).await
}

/// Fresh, migrated in-memory database.
///
/// A single connection that never expires, since every connection to
/// `sqlite::memory:` opens its own empty database.
pub async fn connect_in_memory() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
