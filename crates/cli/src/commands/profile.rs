//! Profile commands.
//!
//! Without an ID these act on the logged-in account. Another account's
//! profile is only reachable by the admin.
//!
//! # Usage
//!
//! ```bash
//! roster profile show
//! roster profile edit --name "New Name" --phone 555-0199
//! ```

use roster_accounts::{AccountError, AuthGate, FileStore, Roster};
use roster_core::{AccountId, Password, ProfileChanges};
use secrecy::{ExposeSecret, SecretString};

use super::{CommandError, log_account};

/// Profile fields supplied on the command line.
#[derive(Default)]
pub struct EditArgs {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl EditArgs {
    /// Convert to a profile edit, refusing an empty one.
    pub fn into_changes(self) -> Result<ProfileChanges, CommandError> {
        let changes = ProfileChanges {
            name: self.name,
            phone_number: self.phone_number,
            email: self.email,
            password: self.password.map(|p| Password::new(p.expose_secret())),
        };
        if changes.is_empty() {
            return Err(CommandError::NoChanges);
        }
        Ok(changes)
    }
}

/// Pick the target account: `id` if given, otherwise the session's own.
///
/// Targeting anyone but yourself requires the admin session.
async fn resolve_target(
    gate: &AuthGate<'_>,
    id: Option<String>,
) -> Result<AccountId, CommandError> {
    let current = gate
        .current_account()
        .await?
        .ok_or(AccountError::NotAuthenticated)?;

    match id.map(AccountId::from) {
        Some(id) if id != current.id => {
            gate.require_admin().await?;
            Ok(id)
        }
        _ => Ok(current.id),
    }
}

/// Show a profile.
pub async fn show(roster: &Roster<FileStore>, id: Option<String>) -> Result<(), CommandError> {
    let gate = roster.gate().await?;
    let target = resolve_target(&gate, id).await?;

    let account = roster
        .profiles()
        .get_profile(&target)
        .await?
        .ok_or(AccountError::NotFound)?;
    log_account(&account);
    Ok(())
}

/// Edit a profile.
pub async fn edit(
    roster: &Roster<FileStore>,
    id: Option<String>,
    args: EditArgs,
) -> Result<(), CommandError> {
    let changes = args.into_changes()?;
    let gate = roster.gate().await?;
    let target = resolve_target(&gate, id).await?;

    let account = roster
        .profiles()
        .apply(&target, changes)
        .await?
        .ok_or(AccountError::NotFound)?;

    tracing::info!("Profile updated successfully!");
    log_account(&account);
    Ok(())
}
