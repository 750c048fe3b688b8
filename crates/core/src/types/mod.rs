//! Core types for Roster.
//!
//! This module provides type-safe wrappers for account domain concepts.

pub mod account;
pub mod email;
pub mod id;
pub mod password;
pub mod role;
pub mod validation;

pub use account::{Account, Landing, NewAccount, ProfileChanges};
pub use email::{Email, EmailError};
pub use id::AccountId;
pub use password::Password;
pub use role::RoleType;
pub use validation::ValidationError;
