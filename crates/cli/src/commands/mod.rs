//! `gh-cart` subcommand implementations.
//!
//! Commands return the text to print rather than printing it, so the binary
//! owns stdout and tests can assert on output directly.

pub mod cart;
pub mod checkout;

use green_hub_core::CartStore;

use crate::config::CliConfig;
use crate::storage::FileStorage;

/// Everything a command needs: the cart and how to format prices.
#[derive(Debug, Clone)]
pub struct Context {
    pub store: CartStore<FileStorage>,
    pub currency_symbol: String,
}

impl Context {
    /// Open the cart described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: &CliConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = FileStorage::open(&config.data_dir)?;
        tracing::debug!(dir = %config.data_dir.display(), key = %config.cart_key, "Opened cart storage");
        Ok(Self {
            store: CartStore::with_key(storage, config.cart_key.clone()),
            currency_symbol: config.currency_symbol.clone(),
        })
    }
}
