//! Ledger transaction engine
//!
//! This module provides the `LedgerEngine`, the only component that changes
//! stored balances. Every operation runs as one store transaction:
//!
//! ```text
//! BEGIN
//!   debit source            (balance >= 0 check may reject it)
//!   credit destination      | or replace service price
//! COMMIT                    | ROLLBACK on the first failure
//! ```
//!
//! The debit always runs first, so a rejected debit leaves nothing to undo.
//! A statement that matches no row is treated as a missing record and rolls
//! the transaction back, so a transfer from or to an unknown key never
//! commits.

use crate::store::statements;
use crate::types::{AccountKey, Amount, LedgerError, Service};
use log::{error, info, warn};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

pub const CLIENT_ID_BY_ACCOUNT: &str = "SELECT id FROM client WHERE balance_number = ?";
pub const CLIENT_ID_BY_PHONE: &str = "SELECT id FROM client WHERE phone_number = ?";
pub const SERVICE_ID: &str = "SELECT id FROM services WHERE id = ?";

/// Executes money-moving operations against the shared store
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    pool: SqlitePool,
}

impl LedgerEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Move `amount` between two clients addressed by phone number
    pub async fn transfer_by_phone(
        &self,
        source_phone: i64,
        amount: Amount,
        destination_phone: i64,
    ) -> Result<(), LedgerError> {
        self.transfer(
            AccountKey::Phone(source_phone),
            amount,
            AccountKey::Phone(destination_phone),
        )
        .await
    }

    /// Move `amount` between two clients addressed by account number
    pub async fn transfer_by_account(
        &self,
        source_account: i64,
        amount: Amount,
        destination_account: i64,
    ) -> Result<(), LedgerError> {
        self.transfer(
            AccountKey::Account(source_account),
            amount,
            AccountKey::Account(destination_account),
        )
        .await
    }

    /// Debit `source` and credit `destination` by the same amount, atomically
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is negative (nothing is opened)
    /// - `Query` if a statement fails, e.g. the source balance would go negative
    /// - `NotFound` if either key matches no client
    /// - `Begin`, `Commit` or `RollbackFailed` for transaction-level failures
    pub async fn transfer(
        &self,
        source: AccountKey,
        amount: Amount,
        destination: AccountKey,
    ) -> Result<(), LedgerError> {
        validate_amount(amount)?;

        let operation = "transfer";
        let mut tx = self.begin(operation).await?;
        let outcome = apply_transfer(&mut tx, source, amount, destination).await;
        finish(tx, operation, outcome).await?;

        info!("transferred {} from {} to {}", amount, source, destination);
        Ok(())
    }

    /// Debit a client and set the service's outstanding price, atomically
    ///
    /// The new price is taken verbatim from `service.price`; computing it is
    /// the caller's business. A price of zero or less violates the services
    /// check and rolls the debit back.
    pub async fn pay_service(
        &self,
        source_account: i64,
        amount: Amount,
        service: &Service,
    ) -> Result<(), LedgerError> {
        validate_amount(amount)?;

        let operation = "pay service";
        let mut tx = self.begin(operation).await?;
        let source = AccountKey::Account(source_account);
        let outcome = apply_payment(&mut tx, source, amount, service).await;
        finish(tx, operation, outcome).await?;

        info!(
            "account {} paid {} to service {}, price now {}",
            source_account, amount, service.id, service.price
        );
        Ok(())
    }

    /// Credit a client addressed by login
    pub async fn top_up(&self, login: &str, amount: Amount) -> Result<(), LedgerError> {
        validate_amount(amount)?;

        let operation = "top up";
        let mut tx = self.begin(operation).await?;
        let outcome = match statements::credit_by_login(&mut tx, login, amount).await {
            Ok(0) => Err(LedgerError::NotFound {
                entity: "client",
                key: format!("login {}", login),
            }),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };
        finish(tx, operation, outcome).await?;

        info!("topped up {} by {}", login, amount);
        Ok(())
    }

    /// Ok if a client has this account number
    pub async fn check_account_number(&self, account_number: i64) -> Result<(), LedgerError> {
        self.check_exists(CLIENT_ID_BY_ACCOUNT, account_number)
            .await?
            .ok_or_else(|| LedgerError::client_not_found(AccountKey::Account(account_number)))
    }

    /// Ok if a client has this phone number
    pub async fn check_phone_number(&self, phone_number: i64) -> Result<(), LedgerError> {
        self.check_exists(CLIENT_ID_BY_PHONE, phone_number)
            .await?
            .ok_or_else(|| LedgerError::client_not_found(AccountKey::Phone(phone_number)))
    }

    /// Ok if a service has this id
    pub async fn check_service(&self, service_id: i64) -> Result<(), LedgerError> {
        self.check_exists(SERVICE_ID, service_id)
            .await?
            .ok_or_else(|| LedgerError::service_not_found(service_id))
    }

    async fn check_exists(
        &self,
        statement: &'static str,
        key: i64,
    ) -> Result<Option<()>, LedgerError> {
        let found = sqlx::query_scalar::<_, i64>(statement)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(LedgerError::query(statement))?;
        Ok(found.map(|_| ()))
    }

    async fn begin(
        &self,
        operation: &'static str,
    ) -> Result<Transaction<'static, Sqlite>, LedgerError> {
        self.pool
            .begin()
            .await
            .map_err(|source| LedgerError::Begin { operation, source })
    }
}

fn validate_amount(amount: Amount) -> Result<(), LedgerError> {
    if amount < 0 {
        return Err(LedgerError::InvalidAmount { amount });
    }
    Ok(())
}

async fn apply_transfer(
    conn: &mut SqliteConnection,
    source: AccountKey,
    amount: Amount,
    destination: AccountKey,
) -> Result<(), LedgerError> {
    if statements::debit(conn, source, amount).await? == 0 {
        return Err(LedgerError::client_not_found(source));
    }
    if statements::credit(conn, destination, amount).await? == 0 {
        return Err(LedgerError::client_not_found(destination));
    }
    Ok(())
}

async fn apply_payment(
    conn: &mut SqliteConnection,
    source: AccountKey,
    amount: Amount,
    service: &Service,
) -> Result<(), LedgerError> {
    if statements::debit(conn, source, amount).await? == 0 {
        return Err(LedgerError::client_not_found(source));
    }
    if statements::set_service_price(conn, service.id, service.price).await? == 0 {
        return Err(LedgerError::service_not_found(service.id));
    }
    Ok(())
}

/// Commit on success, roll back on failure
///
/// A failed rollback is reported together with the error that caused it.
async fn finish(
    tx: Transaction<'_, Sqlite>,
    operation: &'static str,
    outcome: Result<(), LedgerError>,
) -> Result<(), LedgerError> {
    match outcome {
        Ok(()) => tx
            .commit()
            .await
            .map_err(|source| LedgerError::Commit { operation, source }),
        Err(err) => {
            warn!("{} failed, rolling back: {}", operation, err);
            match tx.rollback().await {
                Ok(()) => Err(err),
                Err(rollback) => {
                    error!("{} rollback failed: {}", operation, rollback);
                    Err(LedgerError::RollbackFailed {
                        operation,
                        source: Box::new(err),
                        rollback,
                    })
                }
            }
        }
    }
}
