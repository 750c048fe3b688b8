//! Profile editor.

use roster_core::{Account, AccountId, ProfileChanges};

use crate::error::AccountError;
use crate::policy::AccountPolicy;
use crate::storage::{KeyValueStore, StorageError, get_item, keys, set_item};
use crate::store::AccountStore;

/// Reads one account for display and writes edits back.
pub struct ProfileEditor<'a> {
    accounts: AccountStore<'a>,
    storage: &'a dyn KeyValueStore,
    policy: AccountPolicy,
}

impl<'a> ProfileEditor<'a> {
    /// Create a profile editor.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, policy: AccountPolicy) -> Self {
        Self {
            accounts: AccountStore::new(storage, policy),
            storage,
            policy,
        }
    }

    /// Load the account with `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn get_profile(&self, id: &AccountId) -> Result<Option<Account>, StorageError> {
        self.accounts.get(id).await
    }

    /// Overwrite every mutable field of an existing account.
    ///
    /// Returns `false` with the store untouched if the id does not exist.
    /// When the account is the subject of the persisted session marker, the
    /// marker is rewritten with the saved record.
    ///
    /// # Errors
    ///
    /// - `AccountError::Validation` for an empty name or phone number, or a
    ///   changed password below the policy minimum
    /// - `AccountError::AdminAlreadyExists` / `AccountError::UserLimitReached`
    ///   if the role change breaks an invariant
    /// - `AccountError::Storage` if the store or marker cannot be written
    pub async fn set_profile(&self, account: Account) -> Result<bool, AccountError> {
        let Some(stored) = self.accounts.get(&account.id).await? else {
            tracing::debug!(account_id = %account.id, "Profile not found, nothing saved");
            return Ok(false);
        };
        account.validate_edit(&stored, self.policy.min_password_length)?;

        if !self.accounts.upsert(account.clone()).await? {
            return Ok(false);
        }

        let marker: Option<Account> = get_item(self.storage, keys::CURRENT_USER).await?;
        if marker.is_some_and(|current| current.id == account.id) {
            set_item(self.storage, keys::CURRENT_USER, &account).await?;
        }

        tracing::info!(account_id = %account.id, "Profile updated");
        Ok(true)
    }

    /// Apply a partial edit to the account with `id`.
    ///
    /// Returns the saved account, or `None` if the id does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`set_profile`](Self::set_profile), plus
    /// `AccountError::Validation` for a malformed new email.
    pub async fn apply(
        &self,
        id: &AccountId,
        changes: ProfileChanges,
    ) -> Result<Option<Account>, AccountError> {
        let Some(account) = self.get_profile(id).await? else {
            return Ok(None);
        };

        let edited = changes.apply(&account)?;
        if self.set_profile(edited.clone()).await? {
            Ok(Some(edited))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roster_core::{Email, NewAccount, Password, RoleType, ValidationError};

    use super::*;
    use crate::services::auth::AuthGate;
    use crate::services::registration::RegistrationService;
    use crate::storage::MemoryStore;

    async fn register(storage: &MemoryStore, email: &str) -> Account {
        RegistrationService::new(storage, AccountPolicy::default())
            .register(NewAccount {
                name: "A".to_owned(),
                email: email.to_owned(),
                phone_number: "1".to_owned(),
                password: Password::new("pass12"),
                role_type: RoleType::User,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_set_profile_round_trip() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com").await;
        let editor = ProfileEditor::new(&storage, AccountPolicy::default());

        let mut edited = editor.get_profile(&account.id).await.unwrap().unwrap();
        edited.name = "Renamed".to_owned();
        edited.phone_number = "999".to_owned();
        edited.email = Email::parse("renamed@x.com").unwrap();
        assert!(editor.set_profile(edited.clone()).await.unwrap());

        let reloaded = editor.get_profile(&account.id).await.unwrap().unwrap();
        assert_eq!(reloaded, edited);
        assert_eq!(reloaded.id, account.id);
    }

    #[tokio::test]
    async fn test_set_profile_unknown_id_leaves_store_unchanged() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com").await;
        let before = storage.get(keys::USERS).await.unwrap();

        let mut ghost = account;
        ghost.id = AccountId::new("ghost");
        let editor = ProfileEditor::new(&storage, AccountPolicy::default());
        assert!(!editor.set_profile(ghost).await.unwrap());
        assert_eq!(storage.get(keys::USERS).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_set_profile_validates_fields() {
        let storage = MemoryStore::new();
        let mut account = register(&storage, "a@x.com").await;
        account.name = "  ".to_owned();

        let editor = ProfileEditor::new(&storage, AccountPolicy::default());
        assert!(matches!(
            editor.set_profile(account).await,
            Err(AccountError::Validation(ValidationError::Required {
                field: "name"
            }))
        ));
    }

    #[tokio::test]
    async fn test_short_stored_password_does_not_block_other_edits() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com").await;
        let strict = AccountPolicy {
            min_password_length: 10,
            ..AccountPolicy::default()
        };
        let editor = ProfileEditor::new(&storage, strict);

        let mut renamed = account.clone();
        renamed.phone_number = "555".to_owned();
        assert!(editor.set_profile(renamed).await.unwrap());

        let mut repassworded = account;
        repassworded.password = Password::new("short1");
        assert!(matches!(
            editor.set_profile(repassworded).await,
            Err(AccountError::Validation(ValidationError::PasswordTooShort {
                min: 10
            }))
        ));
    }

    #[tokio::test]
    async fn test_set_profile_refreshes_current_marker() {
        let storage = MemoryStore::new();
        let account = register(&storage, "a@x.com").await;
        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();

        let editor = ProfileEditor::new(&storage, AccountPolicy::default());
        let saved = editor
            .apply(
                &account.id,
                ProfileChanges {
                    name: Some("Fresh".to_owned()),
                    ..ProfileChanges::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.name, "Fresh");

        let marker: Account = get_item(&storage, keys::CURRENT_USER)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(marker.name, "Fresh");
    }

    #[tokio::test]
    async fn test_editing_other_account_keeps_marker() {
        let storage = MemoryStore::new();
        register(&storage, "a@x.com").await;
        let other = register(&storage, "b@x.com").await;
        let mut gate = AuthGate::new(&storage, AccountPolicy::default());
        gate.login("a@x.com", "pass12", RoleType::User).await.unwrap();

        let editor = ProfileEditor::new(&storage, AccountPolicy::default());
        let changes = ProfileChanges {
            name: Some("Other".to_owned()),
            ..ProfileChanges::default()
        };
        editor.apply(&other.id, changes).await.unwrap().unwrap();

        let marker: Account = get_item(&storage, keys::CURRENT_USER)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(marker.email.as_str(), "a@x.com");
        assert_eq!(marker.name, "A");
    }

    #[tokio::test]
    async fn test_apply_unknown_id_is_none() {
        let storage = MemoryStore::new();
        let editor = ProfileEditor::new(&storage, AccountPolicy::default());
        let result = editor
            .apply(&AccountId::new("nope"), ProfileChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
