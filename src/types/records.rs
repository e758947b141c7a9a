//! Stored entities of the bank back-office
//!
//! Each struct mirrors one table row. The serde names are the snapshot field
//! names (PascalCase), the sqlx names are the column names.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Money amount in the smallest currency unit
///
/// Stored as a signed 64-bit integer because that is the native SQLite
/// integer type. Balances are kept non-negative by the `client` table check.
pub type Amount = i64;

/// A bank client
///
/// `balance_number` (the account number) and `phone_number` are alternate
/// unique keys; transfers address clients through them, never through `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Client {
    /// Store-assigned identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Unique login
    pub login: String,

    /// Opaque secret, compared verbatim
    pub password: String,

    /// Current balance, never negative
    pub balance: Amount,

    /// Unique account number
    #[serde(rename = "BalanceNumber")]
    #[sqlx(rename = "balance_number")]
    pub account_number: i64,

    /// Unique phone number
    pub phone_number: i64,
}

/// Client fields supplied by the caller when the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub login: String,
    pub password: String,
    pub balance: Amount,
    pub account_number: i64,
    pub phone_number: i64,
}

impl NewClient {
    /// Attach a store-assigned identifier
    pub fn with_id(self, id: i64) -> Client {
        Client {
            id,
            name: self.name,
            login: self.login,
            password: self.password,
            balance: self.balance,
            account_number: self.account_number,
            phone_number: self.phone_number,
        }
    }
}

/// Back-office manager, only used for authorization
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Manager {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub password: String,
}

/// Automated teller machine location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Atm {
    pub id: i64,
    pub name: String,

    /// Street address, stored in the `street` column
    #[sqlx(rename = "street")]
    pub address: String,
}

/// Payable service
///
/// `price` is the outstanding amount of the bill. It is strictly positive in
/// the store and is replaced wholesale by a service payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub price: Amount,
}

/// One line of a client's account listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AccountSummary {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "balance_number")]
    pub account_number: i64,
    pub balance: Amount,
}

/// Alternate key addressing a client in a ledger statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKey {
    /// Client addressed by phone number
    Phone(i64),

    /// Client addressed by account (balance) number
    Account(i64),
}

impl AccountKey {
    /// The bound key value
    pub fn value(self) -> i64 {
        match self {
            AccountKey::Phone(value) | AccountKey::Account(value) => value,
        }
    }

    /// Human-readable label used in errors and logs
    pub fn label(self) -> &'static str {
        match self {
            AccountKey::Phone(_) => "phone number",
            AccountKey::Account(_) => "account number",
        }
    }
}

impl std::fmt::Display for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.value())
    }
}
