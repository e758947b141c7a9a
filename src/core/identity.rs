//! Identity lookup
//!
//! Resolves a login/password pair against the client or manager table.
//! A single keyed read, never a mutation.

use crate::types::{Client, LedgerError, LoginOutcome, Manager, Role};
use log::debug;
use sqlx::SqlitePool;

pub const CLIENT_LOGIN: &str = "SELECT
    id, name, login, password, balance, balance_number, phone_number
FROM client WHERE login = ?";
pub const MANAGER_LOGIN: &str = "SELECT id, name, login, password FROM managers WHERE login = ?";

/// Login resolver over the shared pool
#[derive(Debug, Clone)]
pub struct IdentityLookup {
    pool: SqlitePool,
}

impl IdentityLookup {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Authenticate `login` against the table selected by `role`
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome::NotFound)` - no row has that login
    /// * `Ok(LoginOutcome::Authorized { id })` - password matched
    /// * `Err(LedgerError::InvalidCredential)` - login exists, password differs
    /// * `Err(LedgerError::Query)` - the lookup itself failed
    pub async fn login(
        &self,
        role: Role,
        login: &str,
        password: &str,
    ) -> Result<LoginOutcome, LedgerError> {
        let row = match role {
            Role::Client => sqlx::query_as::<_, Client>(CLIENT_LOGIN)
                .bind(login)
                .fetch_optional(&self.pool)
                .await
                .map_err(LedgerError::query(CLIENT_LOGIN))?
                .map(|client| (client.id, client.password)),
            Role::Manager => sqlx::query_as::<_, Manager>(MANAGER_LOGIN)
                .bind(login)
                .fetch_optional(&self.pool)
                .await
                .map_err(LedgerError::query(MANAGER_LOGIN))?
                .map(|manager| (manager.id, manager.password)),
        };

        let Some((id, stored_password)) = row else {
            debug!("no {} with login {}", role.table(), login);
            return Ok(LoginOutcome::NotFound);
        };

        if stored_password != password {
            return Err(LedgerError::InvalidCredential);
        }

        Ok(LoginOutcome::Authorized { id })
    }

    pub async fn login_client(
        &self,
        login: &str,
        password: &str,
    ) -> Result<LoginOutcome, LedgerError> {
        self.login(Role::Client, login, password).await
    }

    pub async fn login_manager(
        &self,
        login: &str,
        password: &str,
    ) -> Result<LoginOutcome, LedgerError> {
        self.login(Role::Manager, login, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Database, RecordStore};
    use crate::types::NewClient;
    use rstest::rstest;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn lookup_with_client() -> (IdentityLookup, i64) {
        let db = Database::in_memory().await.unwrap();
        let id = RecordStore::new(db.pool().clone())
            .insert_client(&NewClient {
                name: "Vasya".to_string(),
                login: "vasya".to_string(),
                password: "secret".to_string(),
                balance: 0,
                account_number: 1,
                phone_number: 1,
            })
            .await
            .unwrap();
        (IdentityLookup::new(db.pool().clone()), id)
    }

    #[tokio::test]
    async fn test_client_login_ok_returns_id() {
        let (lookup, id) = lookup_with_client().await;
        let outcome = lookup.login_client("vasya", "secret").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Authorized { id });
    }

    #[tokio::test]
    async fn test_client_wrong_password_is_invalid_credential() {
        let (lookup, _) = lookup_with_client().await;
        let err = lookup.login_client("vasya", "password").await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCredential));
    }

    #[rstest]
    #[case::client(Role::Client)]
    #[case::manager(Role::Manager)]
    #[tokio::test]
    async fn test_unknown_login_is_not_found(#[case] role: Role) {
        let (lookup, _) = lookup_with_client().await;
        let outcome = lookup.login(role, "nobody", "secret").await.unwrap();
        assert_eq!(outcome, LoginOutcome::NotFound);
    }

    #[rstest]
    #[case::first("vasya", "secret", 1)]
    #[case::other("masha", "1414", 4)]
    #[tokio::test]
    async fn test_seeded_manager_login(
        #[case] login: &str,
        #[case] password: &str,
        #[case] id: i64,
    ) {
        let db = Database::in_memory().await.unwrap();
        let lookup = IdentityLookup::new(db.pool().clone());

        let outcome = lookup.login_manager(login, password).await.unwrap();
        assert!(outcome.is_authorized());
        assert_eq!(outcome, LoginOutcome::Authorized { id });
    }

    #[tokio::test]
    async fn test_manager_wrong_password_is_invalid_credential() {
        let db = Database::in_memory().await.unwrap();
        let lookup = IdentityLookup::new(db.pool().clone());
        let err = lookup.login_manager("vasya", "1212").await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCredential));
    }

    #[rstest]
    #[case::client(Role::Client, CLIENT_LOGIN)]
    #[case::manager(Role::Manager, MANAGER_LOGIN)]
    #[tokio::test]
    async fn test_missing_table_is_query_error(#[case] role: Role, #[case] expected: &str) {
        // Pool without bootstrap: neither table exists
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let lookup = IdentityLookup::new(pool);

        let err = lookup.login(role, "", "").await.unwrap_err();
        match err {
            LedgerError::Query { statement, .. } => assert_eq!(statement, expected),
            other => panic!("expected query error, got {:?}", other),
        }
    }
}
