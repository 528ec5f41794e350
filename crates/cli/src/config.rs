//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GREEN_HUB_DATA_DIR` - Directory holding the cart storage (default: .green-hub)
//! - `GREEN_HUB_CART_KEY` - Storage key for the cart payload (default: cart)
//! - `GREEN_HUB_CURRENCY_SYMBOL` - Symbol used when printing prices (default: ฿)

use std::path::PathBuf;

use green_hub_core::CART_KEY;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".green-hub";
const DEFAULT_CURRENCY_SYMBOL: &str = "฿";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory the file-backed storage lives in
    pub data_dir: PathBuf,
    /// Key the cart payload is stored under
    pub cart_key: String,
    /// Currency symbol for display
    pub currency_symbol: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = non_blank(&lookup, "GREEN_HUB_DATA_DIR", DEFAULT_DATA_DIR)?;
        let cart_key = non_blank(&lookup, "GREEN_HUB_CART_KEY", CART_KEY)?;
        if !is_valid_key(&cart_key) {
            return Err(ConfigError::InvalidEnvVar(
                "GREEN_HUB_CART_KEY".to_string(),
                "may only contain letters, digits, '-' and '_'".to_string(),
            ));
        }
        let currency_symbol =
            non_blank(&lookup, "GREEN_HUB_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL)?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            cart_key,
            currency_symbol,
        })
    }

    /// Replace the data directory, e.g. from a command-line flag.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

/// Whether `key` can be used as a storage key (and so a file name).
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Get a variable with a default, rejecting values that are set but blank.
fn non_blank(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be blank".to_string(),
        )),
        Some(value) => Ok(value.trim().to_string()),
    }
}
