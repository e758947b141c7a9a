//! Table definitions and seed data
//!
//! Column names and constraints are part of the persisted format: the
//! `client` check keeps balances non-negative and the `services` check keeps
//! prices strictly positive. Both checks also require an integer value, since
//! SQLite turns an overflowing `balance + ?` into a REAL.

use crate::types::LedgerError;
use log::debug;
use sqlx::SqlitePool;

pub const MANAGERS_DDL: &str = "CREATE TABLE IF NOT EXISTS managers (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT    NOT NULL,
    login    TEXT    NOT NULL UNIQUE,
    password TEXT    NOT NULL
)";

pub const CLIENT_DDL: &str = "CREATE TABLE IF NOT EXISTS client (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT    NOT NULL,
    login          TEXT    NOT NULL UNIQUE,
    password       TEXT    NOT NULL,
    balance        INTEGER NOT NULL CHECK (typeof(balance) = 'integer' AND balance >= 0),
    balance_number INTEGER NOT NULL UNIQUE,
    phone_number   INTEGER NOT NULL UNIQUE
)";

pub const ATM_DDL: &str = "CREATE TABLE IF NOT EXISTS atm (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT    NOT NULL,
    street TEXT    NOT NULL
)";

pub const SERVICES_DDL: &str = "CREATE TABLE IF NOT EXISTS services (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT    NOT NULL,
    price INTEGER NOT NULL CHECK (typeof(price) = 'integer' AND price > 0)
)";

pub const MANAGERS_SEED: &str = "INSERT INTO managers (id, name, login, password)
VALUES (1, 'Vasya', 'vasya', 'secret'),
       (2, 'Petya', 'petya', '1212'),
       (3, 'Vanya', 'vanya', '1313'),
       (4, 'Masha', 'masha', '1414'),
       (5, 'Dasha', 'dasha', '1515'),
       (6, 'Sasha', 'sasha', '1616')
ON CONFLICT DO NOTHING";

/// Create all tables and seed the manager rows
///
/// Safe to run on every start: tables are created only when missing and the
/// seed rows are skipped when they already exist.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), LedgerError> {
    for ddl in [MANAGERS_DDL, ATM_DDL, CLIENT_DDL, SERVICES_DDL, MANAGERS_SEED] {
        debug!("bootstrap: {}", ddl.lines().next().unwrap_or(ddl));
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(LedgerError::query(ddl))?;
    }
    Ok(())
}
