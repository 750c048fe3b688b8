//! Account collection persisted under the `users` key.
//!
//! All reads decode the whole collection and all writes re-encode it. The
//! single-admin rule and the user cap are enforced here, on the write path,
//! so every caller gets the same checks.

use roster_core::{Account, AccountId, RoleType};

use crate::error::AccountError;
use crate::policy::AccountPolicy;
use crate::storage::{KeyValueStore, StorageError, get_item, keys, set_item};

/// CRUD over the persisted account collection.
pub struct AccountStore<'a> {
    storage: &'a dyn KeyValueStore,
    policy: AccountPolicy,
}

impl<'a> AccountStore<'a> {
    /// Create an account store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, policy: AccountPolicy) -> Self {
        Self { storage, policy }
    }

    /// List every account in persisted order.
    ///
    /// An unset `users` key is an empty collection. A value that does not
    /// decode is an error, never an empty collection, so a later write cannot
    /// replace it wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or decoded.
    pub async fn list(&self) -> Result<Vec<Account>, StorageError> {
        Ok(get_item(self.storage, keys::USERS).await?.unwrap_or_default())
    }

    /// Look up an account by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or decoded.
    pub async fn get(&self, id: &AccountId) -> Result<Option<Account>, StorageError> {
        let accounts = self.list().await?;
        Ok(accounts.into_iter().find(|a| &a.id == id))
    }

    /// The admin account, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or decoded.
    pub async fn admin(&self) -> Result<Option<Account>, StorageError> {
        let accounts = self.list().await?;
        Ok(accounts.into_iter().find(|a| a.role_type.is_admin()))
    }

    /// Number of accounts holding `role`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or decoded.
    pub async fn count_by_role(&self, role: RoleType) -> Result<usize, StorageError> {
        let accounts = self.list().await?;
        Ok(accounts.iter().filter(|a| a.role_type == role).count())
    }

    /// Append a new account.
    ///
    /// # Errors
    ///
    /// - `AccountError::DuplicateId` if the id is already stored
    /// - `AccountError::AdminAlreadyExists` for a second admin
    /// - `AccountError::UserLimitReached` when the user cap is full
    /// - `AccountError::Storage` if the collection cannot be read or written
    pub async fn insert(&self, account: Account) -> Result<(), AccountError> {
        let mut accounts = self.list().await?;

        if accounts.iter().any(|a| a.id == account.id) {
            return Err(AccountError::DuplicateId);
        }
        self.check_role_admission(&accounts, &account)?;

        tracing::debug!(account_id = %account.id, role = %account.role_type, "Inserting account");
        accounts.push(account);
        self.save(&accounts).await?;
        Ok(())
    }

    /// Replace the account with the same id.
    ///
    /// Returns `false` without writing if no account has that id. Changing
    /// the role is checked against the same invariants as [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// - `AccountError::AdminAlreadyExists` when promoting to a second admin
    /// - `AccountError::UserLimitReached` when demoting into a full user cap
    /// - `AccountError::Storage` if the collection cannot be read or written
    pub async fn upsert(&self, account: Account) -> Result<bool, AccountError> {
        let mut accounts = self.list().await?;

        let Some(index) = accounts.iter().position(|a| a.id == account.id) else {
            return Ok(false);
        };

        let role_changed = accounts
            .get(index)
            .is_some_and(|existing| existing.role_type != account.role_type);
        if role_changed {
            let others: Vec<Account> = accounts
                .iter()
                .filter(|a| a.id != account.id)
                .cloned()
                .collect();
            self.check_role_admission(&others, &account)?;
        }

        if let Some(slot) = accounts.get_mut(index) {
            *slot = account;
        }
        self.save(&accounts).await?;
        Ok(true)
    }

    /// Delete the account with `id`.
    ///
    /// Returns `false` without writing if no account has that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be read or written.
    pub async fn remove(&self, id: &AccountId) -> Result<bool, StorageError> {
        let mut accounts = self.list().await?;
        let initial_len = accounts.len();
        accounts.retain(|a| &a.id != id);

        if accounts.len() == initial_len {
            return Ok(false);
        }

        self.save(&accounts).await?;
        tracing::debug!(account_id = %id, "Removed account");
        Ok(true)
    }

    /// Check that `candidate` may join `others` under its role.
    fn check_role_admission(
        &self,
        others: &[Account],
        candidate: &Account,
    ) -> Result<(), AccountError> {
        match candidate.role_type {
            RoleType::Admin => {
                if others.iter().any(|a| a.role_type.is_admin()) {
                    return Err(AccountError::AdminAlreadyExists);
                }
            }
            RoleType::User => {
                let users = others
                    .iter()
                    .filter(|a| a.role_type == RoleType::User)
                    .count();
                if users >= self.policy.user_limit {
                    return Err(AccountError::UserLimitReached {
                        limit: self.policy.user_limit,
                    });
                }
            }
        }
        Ok(())
    }

    async fn save(&self, accounts: &[Account]) -> Result<(), StorageError> {
        set_item(self.storage, keys::USERS, accounts).await
    }
}
