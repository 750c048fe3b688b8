//! Account registration.

use roster_core::{Account, AccountId, NewAccount};

use crate::error::AccountError;
use crate::policy::AccountPolicy;
use crate::storage::KeyValueStore;
use crate::store::AccountStore;

/// Validates registration input and appends the new account.
pub struct RegistrationService<'a> {
    accounts: AccountStore<'a>,
    policy: AccountPolicy,
}

impl<'a> RegistrationService<'a> {
    /// Create a registration service.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, policy: AccountPolicy) -> Self {
        Self {
            accounts: AccountStore::new(storage, policy),
            policy,
        }
    }

    /// Register a new account under a freshly generated id.
    ///
    /// The new account is not logged in.
    ///
    /// # Errors
    ///
    /// - `AccountError::Validation` for empty fields, a malformed email or a
    ///   short password
    /// - `AccountError::AdminAlreadyExists` if registering a second admin
    /// - `AccountError::UserLimitReached` if the user cap is full
    /// - `AccountError::Storage` if the store cannot be read or written
    pub async fn register(&self, input: NewAccount) -> Result<Account, AccountError> {
        let account = input.into_account(AccountId::generate(), self.policy.min_password_length)?;

        if let Err(e) = self.accounts.insert(account.clone()).await {
            tracing::info!(
                email = %account.email,
                role = %account.role_type,
                error = %e,
                "Registration rejected"
            );
            return Err(e);
        }

        tracing::info!(
            account_id = %account.id,
            role = %account.role_type,
            "Registered account"
        );
        Ok(account)
    }
}
