//! Authentication gate.
//!
//! The gate holds the id of the logged-in account and mirrors it into the
//! persisted `currentUser` marker. The id is always re-resolved against the
//! account store, so a deleted account stops counting as logged in without
//! any extra bookkeeping.
//!
//! Route-level gating belongs to the caller; [`AuthGate::require_admin`] is
//! the check it should use for admin-only views.

use roster_core::{Account, AccountId, RoleType};

use crate::error::AccountError;
use crate::policy::AccountPolicy;
use crate::storage::{KeyValueStore, StorageError, get_item, keys, set_item};
use crate::store::AccountStore;

/// Credential checks plus the single current-session pointer.
pub struct AuthGate<'a> {
    accounts: AccountStore<'a>,
    storage: &'a dyn KeyValueStore,
    current: Option<AccountId>,
}

impl<'a> AuthGate<'a> {
    /// Create a gate with no session, ignoring any persisted marker.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, policy: AccountPolicy) -> Self {
        Self {
            accounts: AccountStore::new(storage, policy),
            storage,
            current: None,
        }
    }

    /// Create a gate whose session is taken from the persisted marker.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be read or decoded.
    pub async fn restore(
        storage: &'a dyn KeyValueStore,
        policy: AccountPolicy,
    ) -> Result<Self, StorageError> {
        let mut gate = Self::new(storage, policy);
        let marker: Option<Account> = get_item(storage, keys::CURRENT_USER).await?;
        gate.current = marker.map(|account| account.id);
        if let Some(id) = &gate.current {
            tracing::debug!(account_id = %id, "Restored session");
        }
        Ok(gate)
    }

    /// Log in with an exact email, password and role match.
    ///
    /// On success the session points at the matched account and the
    /// `currentUser` marker is rewritten. On failure any prior session is
    /// left as it was.
    ///
    /// # Errors
    ///
    /// - `AccountError::InvalidCredentials` if no account matches all three
    /// - `AccountError::Storage` if the store cannot be read or the marker
    ///   cannot be written
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        role_type: RoleType,
    ) -> Result<Account, AccountError> {
        let accounts = self.accounts.list().await?;
        let Some(account) = accounts
            .into_iter()
            .find(|a| a.matches_credentials(email, password, role_type))
        else {
            tracing::warn!(email, role = %role_type, "Login failed");
            return Err(AccountError::InvalidCredentials);
        };

        set_item(self.storage, keys::CURRENT_USER, &account).await?;
        self.current = Some(account.id.clone());

        tracing::info!(account_id = %account.id, role = %account.role_type, "Logged in");
        Ok(account)
    }

    /// Clear the session and the persisted marker.
    ///
    /// The in-memory session is cleared even if removing the marker fails.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be removed.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(id) = self.current.take() {
            tracing::info!(account_id = %id, "Logged out");
        }
        self.storage.remove(keys::CURRENT_USER).await
    }

    /// Id the session points at, without checking that it still exists.
    #[must_use]
    pub const fn current_id(&self) -> Option<&AccountId> {
        self.current.as_ref()
    }

    /// The logged-in account, re-read from the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn current_account(&self) -> Result<Option<Account>, StorageError> {
        match &self.current {
            Some(id) => self.accounts.get(id).await,
            None => Ok(None),
        }
    }

    /// `true` iff the session resolves to an existing account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.current_account().await?.is_some())
    }

    /// The logged-in account, provided it is the admin.
    ///
    /// # Errors
    ///
    /// - `AccountError::NotAuthenticated` without a resolvable session
    /// - `AccountError::Forbidden` if the session is not an admin
    /// - `AccountError::Storage` if the store cannot be read
    pub async fn require_admin(&self) -> Result<Account, AccountError> {
        let account = self
            .current_account()
            .await?
            .ok_or(AccountError::NotAuthenticated)?;
        if !account.role_type.is_admin() {
            return Err(AccountError::Forbidden);
        }
        Ok(account)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roster_core::{NewAccount, Password};

    use super::*;
    use crate::services::registration::RegistrationService;
    use crate::storage::MemoryStore;

    async fn register(storage: &MemoryStore, email: &str, role: RoleType) -> Account {
        RegistrationService::new(storage, AccountPolicy::default())
            .register(NewAccount {
                name: "A".to_owned(),
                email: email.to_owned(),
                phone_number: "1".to_owned(),
                password: Password::new("pass12"),
                role_type: role,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_session_and_marker() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com", RoleType::User).await;

        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        let logged_in = gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();
        assert_eq!(logged_in.id, account.id);
        assert!(gate.is_authenticated().await.unwrap());

        let marker: Option<Account> = get_item(&storage, keys::CURRENT_USER).await.unwrap();
        assert_eq!(marker.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_prior_session() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com", RoleType::User).await;

        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();

        assert!(matches!(
            gate.login("a@x.com", "wrong!", RoleType::User).await,
            Err(AccountError::InvalidCredentials)
        ));
        assert_eq!(gate.current_id(), Some(&account.id));

        let restored = AuthGate::restore(&storage, AccountPolicy::default())
            .await
            .unwrap();
        assert_eq!(restored.current_id(), Some(&account.id));
    }

    #[tokio::test]
    async fn test_login_role_must_match() {
        let storage = MemoryStore::new();
        register(&storage, "root@x.com", RoleType::Admin).await;

        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        assert!(matches!(
            gate.login("root@x.com", "pass12", RoleType::User).await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(!gate.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_without_session_succeeds() {
        let storage = MemoryStore::new();
        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        gate.logout().await.unwrap();
        assert!(!gate.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_marker() {
        let storage = MemoryStore::new();
        register(&storage, "a@x.com", RoleType::User).await;
        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();

        gate.logout().await.unwrap();
        assert!(gate.current_id().is_none());
        assert!(storage.get(keys::CURRENT_USER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_does_not_resolve_after_removal() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com", RoleType::User).await;
        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();

        AccountStore::new(&storage, AccountPolicy::default())
            .remove(&account.id)
            .await
            .unwrap();
        assert!(!gate.is_authenticated().await.unwrap());
        assert!(gate.current_account().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_require_admin() {
        let storage = MemoryStore::new();
        register(&storage, "root@x.com", RoleType::Admin).await;
        register(&storage, "a@x.com", RoleType::User).await;
        let mut gate = AuthGate::new(&storage, AccountPolicy::default());

        assert!(matches!(
            gate.require_admin().await,
            Err(AccountError::NotAuthenticated)
        ));

        gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();
        assert!(matches!(
            gate.require_admin().await,
            Err(AccountError::Forbidden)
        ));

        gate.login("root@x.com", "pass12", RoleType::Admin).await.unwrap();
        assert_eq!(
            gate.require_admin().await.unwrap().email.as_str(),
            "root@x.com"
        );
    }
}
