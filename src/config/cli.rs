//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ipwatch: External IP Checker
///
/// Determines the caller's external IP address, compares it against DNS
/// A-records or a previously saved value, and sends a push notification
/// on mismatch.
#[derive(Debug, Parser)]
#[command(name = "ipwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Check mode to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// IP echo endpoint URL
    #[arg(long = "ip-endpoint", value_name = "URL", global = true)]
    pub ip_endpoint: Option<String>,

    /// Timeout for each external call in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Test mode - log the would-be notification without sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ipwatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare the external IP against a domain's DNS A-records
    Dns {
        /// Hostname whose A-records serve as the reference
        #[arg(long)]
        domain: Option<String>,
    },

    /// Compare the external IP against the previously saved value
    Change {
        /// Path to the saved-IP file
        #[arg(long = "state-file")]
        state_file: Option<PathBuf>,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ipwatch.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
