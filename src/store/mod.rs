//! SQLite persistence module
//!
//! The store is the single shared mutable resource. Components receive the
//! pool explicitly; there is no process-wide handle.
//!
//! - `schema` - Table definitions, seed data and bootstrap
//! - `repos` - Record Store: inserts, listings and snapshot restores
//! - `statements` - Ledger statement primitives run inside a transaction

pub mod repos;
pub mod schema;
pub mod statements;

pub use repos::RecordStore;
pub use schema::bootstrap;

use crate::types::LedgerError;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Database facade owning the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) a database file and bootstrap its schema
    pub async fn open(path: &Path) -> Result<Self, LedgerError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|source| LedgerError::Connect {
                url: path.display().to_string(),
                source,
            })?;

        info!("opened database {}", path.display());
        Self::bootstrapped(pool).await
    }

    /// Open a private in-memory database and bootstrap its schema
    ///
    /// The pool is limited to one connection that is never recycled, since
    /// every SQLite in-memory connection is a separate database.
    pub async fn in_memory() -> Result<Self, LedgerError> {
        let url = "sqlite::memory:";
        let connect_error = |source: sqlx::Error| LedgerError::Connect {
            url: url.to_string(),
            source,
        };
        let options = SqliteConnectOptions::from_str(url).map_err(connect_error)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(connect_error)?;

        Self::bootstrapped(pool).await
    }

    async fn bootstrapped(pool: SqlitePool) -> Result<Self, LedgerError> {
        bootstrap(&pool).await?;
        Ok(Self { pool })
    }

    /// Shared pool handle
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
