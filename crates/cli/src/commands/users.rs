//! Admin-only account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Log in as the admin first
//! roster login -e root@example.com --password hunter22 -r admin
//!
//! roster users list
//! roster users edit <ID> --phone 555-0142
//! roster users delete <ID>
//! ```

use roster_accounts::{FileStore, Roster};
use roster_core::AccountId;

use super::profile::EditArgs;
use super::{CommandError, log_account};

/// List every account.
pub async fn list(roster: &Roster<FileStore>) -> Result<(), CommandError> {
    let gate = roster.gate().await?;
    let accounts = roster.admin().list_accounts(&gate).await?;

    tracing::info!(
        "{} account(s), user limit {}",
        accounts.len(),
        roster.policy().user_limit
    );
    for account in &accounts {
        log_account(account);
    }
    Ok(())
}

/// Edit any account.
pub async fn edit(
    roster: &Roster<FileStore>,
    id: String,
    args: EditArgs,
) -> Result<(), CommandError> {
    let changes = args.into_changes()?;
    let gate = roster.gate().await?;
    let account = roster
        .admin()
        .edit_account(&gate, &AccountId::from(id), changes)
        .await?;

    tracing::info!("Account updated successfully!");
    log_account(&account);
    Ok(())
}

/// Delete any account.
pub async fn delete(roster: &Roster<FileStore>, id: String) -> Result<(), CommandError> {
    let mut gate = roster.gate().await?;
    let account = roster
        .admin()
        .delete_account(&mut gate, &AccountId::from(id))
        .await?;

    tracing::info!("Deleted {} ({})", account.name, account.email);
    if gate.current_id().is_none() {
        tracing::warn!("You deleted your own account and have been logged out.");
    }
    Ok(())
}
