//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while talking to the
//! store, moving money, authenticating users, or handling snapshots.
//!
//! # Error Categories
//!
//! - **Query errors**: A single statement failed; carries the statement text
//! - **Transaction errors**: `BEGIN` or `COMMIT` failed, or a rollback failed
//!   after a statement error (both causes are kept)
//! - **Domain errors**: Invalid credential, missing row, invalid amount
//! - **Snapshot errors**: File I/O and (de)serialization failures

use super::records::Amount;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ledger
///
/// Storage failures keep the originating `sqlx::Error` as their source so
/// callers can inspect the database error code, while the display text names
/// the statement or operation that failed.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The database could not be opened
    #[error("Can't open database {url}: {source}")]
    Connect {
        /// Connection string or file path
        url: String,
        source: sqlx::Error,
    },

    /// A statement failed to execute
    ///
    /// Includes constraint violations, e.g. a debit that would drive a
    /// balance below zero.
    #[error("Can't execute query {statement}: {source}")]
    Query {
        /// SQL text of the failed statement
        statement: &'static str,
        source: sqlx::Error,
    },

    /// A transaction could not be started
    #[error("Can't begin transaction for {operation}: {source}")]
    Begin {
        /// Ledger operation that needed the transaction
        operation: &'static str,
        source: sqlx::Error,
    },

    /// Every statement succeeded but the commit failed
    ///
    /// Nothing was applied: the store never committed the transaction.
    #[error("Can't commit transaction for {operation}: {source}")]
    Commit {
        /// Ledger operation being committed
        operation: &'static str,
        source: sqlx::Error,
    },

    /// A statement failed and the rollback that followed failed too
    #[error("{operation} failed: {source}; rollback failed: {rollback}")]
    RollbackFailed {
        /// Ledger operation being rolled back
        operation: &'static str,
        /// Error that triggered the rollback
        source: Box<LedgerError>,
        /// Error returned by the rollback itself
        rollback: sqlx::Error,
    },

    /// Login exists but the password does not match
    #[error("Invalid password")]
    InvalidCredential,

    /// A lookup or a ledger statement matched no row
    #[error("{entity} with {key} not found")]
    NotFound {
        /// Kind of record looked up ("client", "service")
        entity: &'static str,
        /// Description of the key used for the lookup
        key: String,
    },

    /// Amount is negative
    #[error("Invalid amount {amount}: must not be negative")]
    InvalidAmount {
        /// The rejected amount
        amount: Amount,
    },

    /// Snapshot file could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Snapshot file path
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON snapshot could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML snapshot could not be (de)serialized
    #[error("XML error: {0}")]
    Xml(String),

    /// CSV snapshot could not be (de)serialized
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// Helper functions for creating common errors

impl LedgerError {
    /// Build a `map_err` adapter wrapping a `sqlx::Error` with its statement
    pub fn query(statement: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| LedgerError::Query { statement, source }
    }

    /// Create a NotFound error for a client addressed by an alternate key
    pub fn client_not_found(key: impl std::fmt::Display) -> Self {
        LedgerError::NotFound {
            entity: "client",
            key: key.to_string(),
        }
    }

    /// Create a NotFound error for a service
    pub fn service_not_found(service_id: i64) -> Self {
        LedgerError::NotFound {
            entity: "service",
            key: format!("id {}", service_id),
        }
    }

    /// Create an Io error for a snapshot path
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| LedgerError::Io { path, source }
    }

    /// Whether this error means a record was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }
}
