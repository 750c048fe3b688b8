//! Admin-only account management.
//!
//! Every operation first checks that the gate's session is the admin.

use roster_core::{Account, AccountId, ProfileChanges};

use crate::error::AccountError;
use crate::policy::AccountPolicy;
use crate::services::auth::AuthGate;
use crate::services::profile::ProfileEditor;
use crate::storage::KeyValueStore;
use crate::store::AccountStore;

/// List, edit and delete any account on behalf of the admin.
pub struct AdminConsole<'a> {
    accounts: AccountStore<'a>,
    profiles: ProfileEditor<'a>,
}

impl<'a> AdminConsole<'a> {
    /// Create an admin console.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, policy: AccountPolicy) -> Self {
        Self {
            accounts: AccountStore::new(storage, policy),
            profiles: ProfileEditor::new(storage, policy),
        }
    }

    /// Every account, for the user list.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotAuthenticated` / `AccountError::Forbidden`
    /// unless the session is the admin, or `AccountError::Storage`.
    pub async fn list_accounts(&self, gate: &AuthGate<'_>) -> Result<Vec<Account>, AccountError> {
        gate.require_admin().await?;
        Ok(self.accounts.list().await?)
    }

    /// Apply a partial edit to any account.
    ///
    /// # Errors
    ///
    /// - `AccountError::NotAuthenticated` / `AccountError::Forbidden` unless
    ///   the session is the admin
    /// - `AccountError::NotFound` if `id` does not exist
    /// - anything [`ProfileEditor::apply`] returns
    pub async fn edit_account(
        &self,
        gate: &AuthGate<'_>,
        id: &AccountId,
        changes: ProfileChanges,
    ) -> Result<Account, AccountError> {
        gate.require_admin().await?;
        self.profiles
            .apply(id, changes)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// Delete any account and return the removed record.
    ///
    /// Deleting the account the session points at (the admin deleting
    /// itself) also logs the session out.
    ///
    /// # Errors
    ///
    /// - `AccountError::NotAuthenticated` / `AccountError::Forbidden` unless
    ///   the session is the admin
    /// - `AccountError::NotFound` if `id` does not exist
    /// - `AccountError::Storage` if the store cannot be read or written
    pub async fn delete_account(
        &self,
        gate: &mut AuthGate<'_>,
        id: &AccountId,
    ) -> Result<Account, AccountError> {
        let admin = gate.require_admin().await?;
        let account = self.accounts.get(id).await?.ok_or(AccountError::NotFound)?;

        if !self.accounts.remove(id).await? {
            return Err(AccountError::NotFound);
        }
        tracing::info!(account_id = %id, admin_id = %admin.id, "Deleted account");

        if gate.current_id() == Some(id) {
            gate.logout().await?;
        }
        Ok(account)
    }
}
