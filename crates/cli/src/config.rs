//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROSTER_DATA_DIR` - Directory holding the store files (default: `.roster`)
//! - `ROSTER_USER_LIMIT` - Maximum number of `user` accounts (default: 5)
//! - `ROSTER_MIN_PASSWORD_LENGTH` - Minimum password length (default: 6)
//! - `ROSTER_LOG_JSON` - Emit logs as JSON when set
//! - `RUST_LOG` - Log filter (default: `roster_cli=info,roster_accounts=info`)

use std::path::PathBuf;

use roster_accounts::AccountPolicy;
use roster_accounts::policy::DEFAULT_USER_LIMIT;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".roster";

/// Password length the registration form asks for.
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Roster CLI configuration.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Limits applied to registration and profile edits
    pub policy: AccountPolicy,
}

impl RosterConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("ROSTER_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let user_limit = parse_count(&lookup, "ROSTER_USER_LIMIT", DEFAULT_USER_LIMIT)?;
        let min_password_length = parse_count(
            &lookup,
            "ROSTER_MIN_PASSWORD_LENGTH",
            DEFAULT_MIN_PASSWORD_LENGTH,
        )?;
        if min_password_length == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ROSTER_MIN_PASSWORD_LENGTH".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            policy: AccountPolicy {
                user_limit,
                min_password_length,
            },
        })
    }
}

/// Parse an optional non-negative integer variable.
fn parse_count(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
