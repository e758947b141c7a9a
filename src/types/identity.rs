//! Login roles and outcomes

use clap::ValueEnum;

/// Table a login is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Client,
    Manager,
}

impl Role {
    /// Name of the table holding this role's credentials
    pub fn table(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Manager => "managers",
        }
    }
}

/// Result of a login lookup that did not fail
///
/// A wrong password is not an outcome: it is reported as
/// [`LedgerError::InvalidCredential`](crate::types::LedgerError::InvalidCredential)
/// so callers cannot confuse it with a missing login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No row with that login
    NotFound,

    /// Login and password matched
    Authorized {
        /// Identifier of the matched client or manager
        id: i64,
    },
}

impl LoginOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, LoginOutcome::Authorized { .. })
    }
}
