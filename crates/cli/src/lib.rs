//! Green Hub CLI - drive the shopping cart from the command line.
//!
//! The cart lives in a data directory (see [`config`]) through
//! [`storage::FileStorage`]; each subcommand in [`commands`] opens it, performs
//! one operation and returns the text to show.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod storage;

pub use commands::Context;
pub use config::{CliConfig, ConfigError};
pub use storage::FileStorage;
