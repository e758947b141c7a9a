//! Record Store
//!
//! Plain create/read operations over the client, atm and services tables.
//! None of these touch balances after creation; that is the ledger's job.

use crate::types::{AccountSummary, Amount, Atm, Client, LedgerError, NewClient, Service};
use futures::stream::BoxStream;
use futures::TryStreamExt;
use log::{debug, info};
use sqlx::SqlitePool;

pub const INSERT_CLIENT: &str = "INSERT INTO client
    (name, login, password, balance, balance_number, phone_number)
VALUES (?, ?, ?, ?, ?, ?)";
pub const INSERT_CLIENT_WITH_ID: &str = "INSERT INTO client
    (id, name, login, password, balance, balance_number, phone_number)
VALUES (?, ?, ?, ?, ?, ?, ?)";
pub const INSERT_ATM: &str = "INSERT INTO atm (name, street) VALUES (?, ?)";
pub const INSERT_ATM_WITH_ID: &str = "INSERT INTO atm (id, name, street) VALUES (?, ?, ?)";
pub const INSERT_SERVICE: &str = "INSERT INTO services (name, price) VALUES (?, ?)";
pub const ALL_CLIENTS: &str = "SELECT
    id, name, login, password, balance, balance_number, phone_number
FROM client ORDER BY id";
pub const ALL_ATMS: &str = "SELECT id, name, street FROM atm ORDER BY id";
pub const ALL_SERVICES: &str = "SELECT id, name, price FROM services ORDER BY id";
pub const SERVICE_BY_ID: &str = "SELECT id, name, price FROM services WHERE id = ?";
pub const CLIENT_ACCOUNTS: &str =
    "SELECT id, name, balance_number, balance FROM client WHERE id = ?";
pub const CLIENT_BY_ACCOUNT: &str = "SELECT
    id, name, login, password, balance, balance_number, phone_number
FROM client WHERE balance_number = ?";

/// Create/read access to the stored records
#[derive(Debug, Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a client and return the store-assigned id
    ///
    /// Fails with a query error when login, account number or phone number
    /// collides with an existing client, or the balance is negative.
    pub async fn insert_client(&self, client: &NewClient) -> Result<i64, LedgerError> {
        let result = sqlx::query(INSERT_CLIENT)
            .bind(&client.name)
            .bind(&client.login)
            .bind(&client.password)
            .bind(client.balance)
            .bind(client.account_number)
            .bind(client.phone_number)
            .execute(&self.pool)
            .await
            .map_err(LedgerError::query(INSERT_CLIENT))?;

        let id = result.last_insert_rowid();
        info!("added client {} ({})", id, client.login);
        Ok(id)
    }

    /// Insert an ATM location and return the store-assigned id
    pub async fn insert_atm(&self, name: &str, street: &str) -> Result<i64, LedgerError> {
        let result = sqlx::query(INSERT_ATM)
            .bind(name)
            .bind(street)
            .execute(&self.pool)
            .await
            .map_err(LedgerError::query(INSERT_ATM))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a payable service and return the store-assigned id
    pub async fn insert_service(&self, name: &str, price: Amount) -> Result<i64, LedgerError> {
        let result = sqlx::query(INSERT_SERVICE)
            .bind(name)
            .bind(price)
            .execute(&self.pool)
            .await
            .map_err(LedgerError::query(INSERT_SERVICE))?;

        Ok(result.last_insert_rowid())
    }

    /// Stream every client row in id order
    pub fn stream_clients(&self) -> BoxStream<'_, Result<Client, sqlx::Error>> {
        sqlx::query_as::<_, Client>(ALL_CLIENTS).fetch(&self.pool)
    }

    /// Stream every ATM row in id order
    pub fn stream_atms(&self) -> BoxStream<'_, Result<Atm, sqlx::Error>> {
        sqlx::query_as::<_, Atm>(ALL_ATMS).fetch(&self.pool)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, LedgerError> {
        self.stream_clients()
            .try_collect::<Vec<_>>()
            .await
            .map_err(LedgerError::query(ALL_CLIENTS))
    }

    pub async fn list_atms(&self) -> Result<Vec<Atm>, LedgerError> {
        self.stream_atms()
            .try_collect::<Vec<_>>()
            .await
            .map_err(LedgerError::query(ALL_ATMS))
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, LedgerError> {
        sqlx::query_as::<_, Service>(ALL_SERVICES)
            .fetch_all(&self.pool)
            .await
            .map_err(LedgerError::query(ALL_SERVICES))
    }

    pub async fn find_service(&self, service_id: i64) -> Result<Option<Service>, LedgerError> {
        sqlx::query_as::<_, Service>(SERVICE_BY_ID)
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(LedgerError::query(SERVICE_BY_ID))
    }

    /// Account listing of one client, by internal id
    ///
    /// Empty when the id is unknown.
    pub async fn client_accounts(
        &self,
        client_id: i64,
    ) -> Result<Vec<AccountSummary>, LedgerError> {
        sqlx::query_as::<_, AccountSummary>(CLIENT_ACCOUNTS)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await
            .map_err(LedgerError::query(CLIENT_ACCOUNTS))
    }

    /// Read one client by account number
    pub async fn find_client_by_account(
        &self,
        account_number: i64,
    ) -> Result<Option<Client>, LedgerError> {
        sqlx::query_as::<_, Client>(CLIENT_BY_ACCOUNT)
            .bind(account_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(LedgerError::query(CLIENT_BY_ACCOUNT))
    }

    /// Insert clients keeping their identifiers
    ///
    /// All rows go in under one transaction: the first failing insert aborts
    /// the call and nothing from `clients` remains.
    pub async fn restore_clients(&self, clients: &[Client]) -> Result<usize, LedgerError> {
        let operation = "restore clients";
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| LedgerError::Begin { operation, source })?;

        for client in clients {
            debug!("restoring client {}", client.id);
            sqlx::query(INSERT_CLIENT_WITH_ID)
                .bind(client.id)
                .bind(&client.name)
                .bind(&client.login)
                .bind(&client.password)
                .bind(client.balance)
                .bind(client.account_number)
                .bind(client.phone_number)
                .execute(&mut *tx)
                .await
                .map_err(LedgerError::query(INSERT_CLIENT_WITH_ID))?;
        }

        tx.commit()
            .await
            .map_err(|source| LedgerError::Commit { operation, source })?;
        info!("restored {} clients", clients.len());
        Ok(clients.len())
    }

    /// Insert ATM locations keeping their identifiers, all or nothing
    pub async fn restore_atms(&self, atms: &[Atm]) -> Result<usize, LedgerError> {
        let operation = "restore atms";
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| LedgerError::Begin { operation, source })?;

        for atm in atms {
            sqlx::query(INSERT_ATM_WITH_ID)
                .bind(atm.id)
                .bind(&atm.name)
                .bind(&atm.address)
                .execute(&mut *tx)
                .await
                .map_err(LedgerError::query(INSERT_ATM_WITH_ID))?;
        }

        tx.commit()
            .await
            .map_err(|source| LedgerError::Commit { operation, source })?;
        info!("restored {} atms", atms.len());
        Ok(atms.len())
    }
}
