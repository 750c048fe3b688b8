//! Unified error handling for account operations.

use thiserror::Error;

use roster_core::ValidationError;

use crate::storage::StorageError;

/// Errors surfaced by the account store and the services built on it.
///
/// Nothing here is retried or reported by this crate; the caller decides
/// what to show the user.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Malformed input caught before reaching the store.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An admin account already exists.
    #[error("an admin already exists")]
    AdminAlreadyExists,

    /// The number of `user` accounts is at the cap.
    #[error("user limit of {limit} reached")]
    UserLimitReached {
        /// The configured cap.
        limit: usize,
    },

    /// No account matches the email, password and role supplied.
    #[error("invalid email, password, or role")]
    InvalidCredentials,

    /// The requested account does not exist.
    #[error("account not found")]
    NotFound,

    /// The operation requires a logged-in session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The current session lacks the admin role.
    #[error("admins only")]
    Forbidden,

    /// An account with the same id is already stored.
    #[error("an account with this id already exists")]
    DuplicateId,

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
