//! Roster Accounts - Account store, registration and authentication gate.
//!
//! Everything persists through a [`KeyValueStore`](storage::KeyValueStore)
//! under two keys:
//!
//! - `users` - JSON array of every [`Account`](roster_core::Account)
//! - `currentUser` - the account record of the logged-in session, if any
//!
//! # Architecture
//!
//! - [`storage`] - Async key-value port plus in-memory and file backends
//! - [`store`] - [`AccountStore`], CRUD over the `users` collection with the
//!   single-admin and user-cap invariants enforced on write
//! - [`services`] - Registration, the authentication gate, the profile editor
//!   and the admin console
//! - [`Roster`] - Owns a storage backend and hands out the services above
//!
//! There is no locking or transactional atomicity. Every write is a plain
//! read-modify-write of the whole collection; the last writer wins.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod policy;
pub mod services;
pub mod storage;
pub mod store;

pub use error::AccountError;
pub use policy::AccountPolicy;
pub use services::admin::AdminConsole;
pub use services::auth::AuthGate;
pub use services::profile::ProfileEditor;
pub use services::registration::RegistrationService;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::AccountStore;

/// Entry point owning a storage backend and the account policy.
///
/// Services borrow the backend, so they are cheap to create per operation.
#[derive(Debug)]
pub struct Roster<S> {
    storage: S,
    policy: AccountPolicy,
}

impl<S: KeyValueStore> Roster<S> {
    /// Create a roster over `storage` with the given policy.
    #[must_use]
    pub const fn new(storage: S, policy: AccountPolicy) -> Self {
        Self { storage, policy }
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The account policy in effect.
    #[must_use]
    pub const fn policy(&self) -> AccountPolicy {
        self.policy
    }

    /// Direct access to the account collection.
    #[must_use]
    pub fn accounts(&self) -> AccountStore<'_> {
        AccountStore::new(&self.storage, self.policy)
    }

    /// Registration service.
    #[must_use]
    pub fn registration(&self) -> RegistrationService<'_> {
        RegistrationService::new(&self.storage, self.policy)
    }

    /// Profile editor.
    #[must_use]
    pub fn profiles(&self) -> ProfileEditor<'_> {
        ProfileEditor::new(&self.storage, self.policy)
    }

    /// Admin-only account management.
    #[must_use]
    pub fn admin(&self) -> AdminConsole<'_> {
        AdminConsole::new(&self.storage, self.policy)
    }

    /// Authentication gate restored from the persisted session marker.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be read or decoded.
    pub async fn gate(&self) -> Result<AuthGate<'_>, StorageError> {
        AuthGate::restore(&self.storage, self.policy).await
    }
}
