//! Registration and session commands.
//!
//! # Usage
//!
//! ```bash
//! # Register the admin, then a user
//! roster register -n "Root" -e root@example.com -p 555-0100 --password hunter22 -r admin
//! roster register -n "A" -e a@example.com -p 555-0101 --password pass12
//!
//! # Log in, check the session, log out
//! roster login -e a@example.com --password pass12
//! roster whoami
//! roster logout
//! ```

use roster_accounts::{FileStore, Roster};
use roster_core::{Landing, NewAccount, Password, RoleType};
use secrecy::{ExposeSecret, SecretString};

use super::{CommandError, log_account};

/// Registration input collected from the command line.
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: SecretString,
    pub role: String,
}

/// Parse a role argument.
pub fn parse_role(role: &str) -> Result<RoleType, CommandError> {
    role.parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))
}

/// Register a new account. The new account is not logged in.
pub async fn register(roster: &Roster<FileStore>, args: RegisterArgs) -> Result<(), CommandError> {
    let role_type = parse_role(&args.role)?;

    let account = roster
        .registration()
        .register(NewAccount {
            name: args.name,
            email: args.email,
            phone_number: args.phone_number,
            password: Password::new(args.password.expose_secret()),
            role_type,
        })
        .await?;

    tracing::info!(
        "Registration successful! ID: {}, Email: {}, Role: {}",
        account.id,
        account.email,
        account.role_type
    );
    tracing::info!("Log in with: roster login -e {} -r {}", account.email, account.role_type);
    Ok(())
}

/// Log in and report where the account lands.
pub async fn login(
    roster: &Roster<FileStore>,
    email: &str,
    password: &SecretString,
    role: &str,
) -> Result<(), CommandError> {
    let role_type = parse_role(role)?;

    let mut gate = roster.gate().await?;
    let account = gate
        .login(email, password.expose_secret(), role_type)
        .await?;

    tracing::info!("Logged in as {} ({})", account.name, account.role_type);
    match Landing::for_account(&account) {
        Landing::UserList => tracing::info!("Next: roster users list"),
        Landing::Profile(id) => tracing::info!("Next: roster profile show {id}"),
    }
    Ok(())
}

/// Log out. Succeeds with or without an active session.
pub async fn logout(roster: &Roster<FileStore>) -> Result<(), CommandError> {
    let mut gate = roster.gate().await?;
    gate.logout().await?;
    tracing::info!("Logged out.");
    Ok(())
}

/// Report the logged-in account.
pub async fn whoami(roster: &Roster<FileStore>) -> Result<(), CommandError> {
    let gate = roster.gate().await?;
    match gate.current_account().await? {
        Some(account) => log_account(&account),
        None => tracing::info!("Not logged in."),
    }
    Ok(())
}
