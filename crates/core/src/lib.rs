//! Roster Core - Shared account types library.
//!
//! This crate provides the domain types used across all Roster components:
//! - `accounts` - Account store, registration, authentication gate and profile editor
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account ids, emails, passwords and roles,
//!   plus the [`Account`] record itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
