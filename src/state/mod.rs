//! Saved-IP persistence for detecting changes across invocations.
//!
//! This module provides abstractions for storing and retrieving the
//! last observed external IP address between program executions.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileStateStore;

use std::io;
use std::net::IpAddr;

use thiserror::Error;

/// Result of loading the saved IP from persistent storage.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - Successfully loaded a previously saved address
/// - No previous value exists (first run)
/// - A file exists but is unreadable or not an IP address
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// Successfully loaded the previously saved address.
    Loaded(IpAddr),

    /// No saved-IP file exists (first run or explicitly deleted).
    NotFound,

    /// A saved-IP file exists but could not be read or parsed.
    /// The run should continue as a first run and overwrite on save.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded address, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<IpAddr> {
        match self {
            Self::Loaded(ip) => Some(*ip),
            Self::NotFound | Self::Corrupted { .. } => None,
        }
    }

    /// Returns `true` if a saved address was successfully loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Errors that can occur during saved-IP persistence operations.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants to allow graceful degradation.
#[derive(Debug, Error)]
pub enum StateError {
    /// Failed to write the saved-IP file.
    #[error("Failed to write saved-IP file: {0}")]
    Write(#[source] io::Error),
}

/// Abstraction for persisting the last observed IP between runs.
///
/// Implementations should:
/// - Use atomic writes to prevent corruption from crashes
/// - Handle missing files gracefully (return `LoadResult::NotFound`)
/// - Degrade gracefully on read errors (return `LoadResult::Corrupted`)
///
/// Only one reader and one writer (the current process) are expected;
/// overlapping invocations are the operator's responsibility to avoid.
pub trait StateStore: Send + Sync {
    /// Loads the previously saved address.
    fn load(&self) -> LoadResult;

    /// Saves the current address for future reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be written.
    fn save(
        &self,
        ip: IpAddr,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}
