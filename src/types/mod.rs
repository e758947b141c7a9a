//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `records`: Stored entities (clients, managers, ATMs, services)
//! - `identity`: Login roles and outcomes
//! - `error`: Error types for the ledger

pub mod error;
pub mod identity;
pub mod records;

pub use error::LedgerError;
pub use identity::{LoginOutcome, Role};
pub use records::{AccountKey, AccountSummary, Amount, Atm, Client, Manager, NewClient, Service};
