//! Configuration layer for ipwatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`], [`Mode`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The check mode itself is always chosen by the subcommand (`dns` or
//! `change`); the config file only supplies the mode's parameters
//! (`common.domain`, `state.file`).
//!
//! # TOML-Only Options
//!
//! Credentials and notification options are intentionally not available
//! via CLI, so secrets never end up in shell history or process listings:
//! - `pushover.user_key` (required) - Recipient user key
//! - `pushover.token` (required) - Application API token
//! - `pushover.sound` - Notification sound override
//! - `pushover.api_url` - Message API endpoint override
//! - `pushover.message_template` - Handlebars message override

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{Mode, ValidatedConfig, write_default_config};
