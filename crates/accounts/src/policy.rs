//! Account limits applied on registration and profile writes.

/// Default cap on accounts with the `user` role.
pub const DEFAULT_USER_LIMIT: usize = 5;

/// Default minimum password length, in characters.
///
/// The store itself only requires a password to be present. Front ends apply
/// their own, stricter form rule through [`AccountPolicy::min_password_length`].
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 1;

/// Limits enforced by the account store and the services on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPolicy {
    /// Maximum number of `user`-role accounts.
    pub user_limit: usize,
    /// Minimum password length, in characters.
    pub min_password_length: usize,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            user_limit: DEFAULT_USER_LIMIT,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}
