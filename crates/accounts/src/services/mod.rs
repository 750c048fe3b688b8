//! Account services built on the account store.
//!
//! - [`registration`] - Validate and admit new accounts
//! - [`auth`] - Credential checks and the current-session pointer
//! - [`profile`] - Read and write back a single account
//! - [`admin`] - Admin-only listing, editing and deletion

pub mod admin;
pub mod auth;
pub mod profile;
pub mod registration;
