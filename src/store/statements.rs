//! Ledger statement primitives
//!
//! Each function runs exactly one parameterized UPDATE on a connection the
//! caller has already placed inside a transaction, and returns the number of
//! affected rows. Deciding what zero affected rows means is left to the
//! caller.

use crate::types::{AccountKey, Amount, LedgerError};
use log::debug;
use sqlx::SqliteConnection;

pub const DEBIT_BY_PHONE: &str =
    "UPDATE client SET balance = balance - ? WHERE phone_number = ?";
pub const CREDIT_BY_PHONE: &str =
    "UPDATE client SET balance = balance + ? WHERE phone_number = ?";
pub const DEBIT_BY_ACCOUNT: &str =
    "UPDATE client SET balance = balance - ? WHERE balance_number = ?";
pub const CREDIT_BY_ACCOUNT: &str =
    "UPDATE client SET balance = balance + ? WHERE balance_number = ?";
pub const CREDIT_BY_LOGIN: &str = "UPDATE client SET balance = balance + ? WHERE login = ?";
pub const SET_SERVICE_PRICE: &str = "UPDATE services SET price = ? WHERE id = ?";

/// Subtract `amount` from the balance of the client matching `key`
///
/// Fails with a query error when the `balance >= 0` check rejects the result.
pub async fn debit(
    conn: &mut SqliteConnection,
    key: AccountKey,
    amount: Amount,
) -> Result<u64, LedgerError> {
    let statement = match key {
        AccountKey::Phone(_) => DEBIT_BY_PHONE,
        AccountKey::Account(_) => DEBIT_BY_ACCOUNT,
    };
    execute_keyed(conn, statement, amount, key.value()).await
}

/// Add `amount` to the balance of the client matching `key`
pub async fn credit(
    conn: &mut SqliteConnection,
    key: AccountKey,
    amount: Amount,
) -> Result<u64, LedgerError> {
    let statement = match key {
        AccountKey::Phone(_) => CREDIT_BY_PHONE,
        AccountKey::Account(_) => CREDIT_BY_ACCOUNT,
    };
    execute_keyed(conn, statement, amount, key.value()).await
}

/// Add `amount` to the balance of the client with `login`
pub async fn credit_by_login(
    conn: &mut SqliteConnection,
    login: &str,
    amount: Amount,
) -> Result<u64, LedgerError> {
    debug!("{} [{}, {}]", CREDIT_BY_LOGIN, amount, login);
    let result = sqlx::query(CREDIT_BY_LOGIN)
        .bind(amount)
        .bind(login)
        .execute(conn)
        .await
        .map_err(LedgerError::query(CREDIT_BY_LOGIN))?;
    Ok(result.rows_affected())
}

/// Replace the price of the service with `service_id`
pub async fn set_service_price(
    conn: &mut SqliteConnection,
    service_id: i64,
    price: Amount,
) -> Result<u64, LedgerError> {
    execute_keyed(conn, SET_SERVICE_PRICE, price, service_id).await
}

async fn execute_keyed(
    conn: &mut SqliteConnection,
    statement: &'static str,
    value: i64,
    key: i64,
) -> Result<u64, LedgerError> {
    debug!("{} [{}, {}]", statement, value, key);
    let result = sqlx::query(statement)
        .bind(value)
        .bind(key)
        .execute(conn)
        .await
        .map_err(LedgerError::query(statement))?;
    Ok(result.rows_affected())
}
