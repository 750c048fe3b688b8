//! Integration tests for Roster.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roster-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `registration` - Admin uniqueness, user cap and input validation
//! - `session` - Login, logout and session restore across store instances
//! - `profile` - Profile round trips and the session marker
//! - `storage_failures` - Backend failures and previously persisted data
//!
//! This library holds the fixtures shared by those tests.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use roster_accounts::{AccountPolicy, KeyValueStore, MemoryStore, Roster, StorageError};
use roster_core::{NewAccount, Password, RoleType};

/// Password used by every fixture account.
pub const PASSWORD: &str = "pass12";

/// Registration input for `email` with fixed name, phone and password.
#[must_use]
pub fn new_account(email: &str, role_type: RoleType) -> NewAccount {
    NewAccount {
        name: "A".to_owned(),
        email: email.to_owned(),
        phone_number: "1".to_owned(),
        password: Password::new(PASSWORD),
        role_type,
    }
}

/// A roster over a fresh in-memory store with the default policy.
#[must_use]
pub fn memory_roster() -> Roster<MemoryStore> {
    Roster::new(MemoryStore::new(), AccountPolicy::default())
}

/// In-memory store whose writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    /// Make every subsequent `set`, `remove` and `clear` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                key: key.to_owned(),
                source: std::io::Error::other("injected write failure"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check("*")?;
        self.inner.clear().await
    }
}
