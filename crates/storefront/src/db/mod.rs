//! Database operations for the storefront `SQLite` database.
//!
//! # Database: `melons.db`
//!
//! ## Tables
//!
//! - `melons` - The melon catalog (read-only for this application)
//! - `customers` - Customer accounts keyed by email
//! - `tower_sessions` - Session storage (owned by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and embedded via
//! [`MIGRATOR`]. They are not applied automatically on startup: the melon and
//! customer tables are treated as pre-existing data. Tests apply them to
//! in-memory databases.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

pub mod customers;
pub mod melons;

pub use customers::{AuthOutcome, CustomerRepository};
pub use melons::MelonRepository;

/// Embedded migrations for tooling and tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed. Never retried; propagates as a fatal
    /// request failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// An insert collided with an existing unique key.
    #[error("record already exists")]
    Conflict,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict;
            }
        }
        Self::Database(err)
    }
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    use super::{MIGRATOR, SqlitePool, SqlitePoolOptions};

    /// A fresh in-memory database with the schema applied.
    ///
    /// A single connection keeps the in-memory database alive and shared.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }
}
