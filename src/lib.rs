//! Bank Ledger Library
//! # Overview
//!
//! This library implements a small banking back-office on top of SQLite:
//! client and manager authentication, client balances, ATM locations,
//! payable services, and the ledger operations that move money.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Client, Atm, Service, LedgerError, etc.)
//! - [`store`] - SQLite persistence:
//!   - [`store::schema`] - Table definitions and idempotent bootstrap
//!   - [`store::repos`] - Record Store: inserts, listings, snapshot restores
//!   - [`store::statements`] - Debit/credit/price statements run in a transaction
//! - [`core`] - Business logic components:
//!   - [`core::identity`] - Login lookup for clients and managers
//!   - [`core::ledger`] - Transfers and service payments
//! - [`io`] - Table snapshots in JSON, XML or CSV
//! - [`cli`] - CLI arguments parsing and command dispatch
//!
//! # Ledger Operations
//!
//! - **Transfer by phone / by account**: Debit the source, credit the destination
//! - **Service payment**: Debit the payer, replace the service's outstanding price
//! - **Top up**: Credit a client addressed by login
//!
//! Each operation is one store transaction. The debit runs first, so the
//! `balance >= 0` check rejects an overdraft before anything is credited, and
//! any failure rolls the whole operation back.
//!
//! # Store Handle
//!
//! Every component takes the `SqlitePool` it works on in its constructor.
//! There is no global connection.

pub mod cli;
pub mod core;
pub mod io;
pub mod store;
pub mod types;

pub use crate::core::{IdentityLookup, LedgerEngine};
pub use io::{SnapshotFormat, SnapshotService, SnapshotTable};
pub use store::{Database, RecordStore};
pub use types::{
    AccountKey, AccountSummary, Amount, Atm, Client, LedgerError, LoginOutcome, Manager,
    NewClient, Role, Service,
};
