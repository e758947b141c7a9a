//! Core business logic module
//!
//! This module contains the components that sit on top of the store:
//! - `identity` - Login resolution for clients and managers
//! - `ledger` - Transfers, service payments and existence checks

pub mod identity;
pub mod ledger;

pub use identity::IdentityLookup;
pub use ledger::LedgerEngine;
