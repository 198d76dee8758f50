use std::sync::Arc;

use tracing::{debug, info, warn};

use murmur_db::{Database, DbError};
use murmur_types::models::Account;

use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Clone)]
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account.
    ///
    /// There is no existence check before the insert: the UNIQUE constraint
    /// on `accounts.username` decides, so two racing registrations cannot
    /// both succeed.
    pub fn create_account(&self, username: &str, password: &str) -> Result<Account, ApiError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Registration(format!(
                "Password must be at least {} characters long.",
                MIN_PASSWORD_LEN
            )));
        }

        match self.db.insert_account(username, password) {
            Ok(row) => {
                info!(account_id = row.id, username, "Account registered");
                Ok(row.into())
            }
            Err(DbError::UniqueViolation(_)) => {
                debug!(username, "Registration rejected: username taken");
                Err(ApiError::DuplicateUsername(username.to_string()))
            }
            Err(DbError::ForeignKeyViolation) => {
                warn!(username, "Unexpected foreign key failure inserting account");
                Err(ApiError::Internal(anyhow::anyhow!(
                    "foreign key failure inserting account"
                )))
            }
            Err(DbError::Other(e)) => Err(ApiError::Internal(e)),
        }
    }

    /// Exact username + password match. `None` on any mismatch.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<Account>, ApiError> {
        let account = self.db.find_account_by_credentials(username, password)?;
        if account.is_none() {
            debug!(username, "Login failed");
        }
        Ok(account.map(Into::into))
    }

    pub fn account_exists(&self, id: i64) -> Result<bool, ApiError> {
        Ok(self.db.find_account_by_id(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AccountService {
        AccountService::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn short_password_is_rejected_for_any_username() {
        let svc = service();
        for username in ["ana", "", "a-very-long-username"] {
            let err = svc.create_account(username, "abc").unwrap_err();
            assert!(matches!(err, ApiError::Registration(_)), "got {err:?}");
        }
    }

    #[test]
    fn four_char_password_is_enough() {
        let svc = service();
        let account = svc.create_account("ana", "abcd").unwrap();
        assert_eq!(account.username, "ana");
        assert_eq!(account.password, "abcd");
        assert!(account.account_id > 0);
    }

    #[test]
    fn second_registration_is_duplicate() {
        let svc = service();
        svc.create_account("ana", "pass1").unwrap();

        let err = svc.create_account("ana", "pass2").unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUsername(ref u) if u == "ana"));
    }

    #[test]
    fn login_requires_exact_pair() {
        let svc = service();
        let created = svc.create_account("ana", "pass1").unwrap();

        assert_eq!(svc.login("ana", "pass1").unwrap(), Some(created));
        assert_eq!(svc.login("ana", "pass2").unwrap(), None);
        assert_eq!(svc.login("bo", "pass1").unwrap(), None);
    }

    #[test]
    fn account_exists_by_id() {
        let svc = service();
        let created = svc.create_account("ana", "pass1").unwrap();

        assert!(svc.account_exists(created.account_id).unwrap());
        assert!(!svc.account_exists(created.account_id + 1).unwrap());
    }
}
