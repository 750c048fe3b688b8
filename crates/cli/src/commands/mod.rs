//! Command implementations.
//!
//! Every command opens the file-backed store from [`RosterConfig`] and
//! reports through `tracing`.

pub mod account;
pub mod profile;
pub mod users;

use roster_accounts::{AccountError, FileStore, Roster, StorageError};
use roster_core::Account;
use thiserror::Error;

use crate::config::{ConfigError, RosterConfig};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Account operation failed.
    #[error("{0}")]
    Account(#[from] AccountError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: user, admin")]
    InvalidRole(String),

    /// A profile edit was requested without any field to change.
    #[error("Nothing to change: pass at least one of --name, --phone, --email, --password")]
    NoChanges,
}

impl From<StorageError> for CommandError {
    fn from(e: StorageError) -> Self {
        Self::Account(AccountError::Storage(e))
    }
}

/// Open the store described by `config`.
pub async fn open(config: &RosterConfig) -> Result<Roster<FileStore>, CommandError> {
    let storage = FileStore::open(&config.data_dir).await?;
    Ok(Roster::new(storage, config.policy))
}

/// Log one account as a single structured line.
fn log_account(account: &Account) {
    tracing::info!(
        id = %account.id,
        name = %account.name,
        email = %account.email,
        phone = %account.phone_number,
        role = %account.role_type,
        "Account"
    );
}
