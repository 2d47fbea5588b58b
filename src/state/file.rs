//! File-based saved-IP persistence implementation.

use std::io::ErrorKind;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use super::{LoadResult, StateError, StateStore};

/// File-based implementation of [`StateStore`].
///
/// Stores the last observed IP as a single-line plain-text file with
/// atomic write semantics.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent corruption:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// This ensures the file is either fully written or not written at all.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Creates a new file-based state store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the saved-IP file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs the blocking save operation.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn save_blocking(path: &Path, ip: IpAddr) -> Result<(), StateError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }

        // Append .tmp instead of replacing extension to avoid conflicts
        // (e.g., saved_ip.txt -> saved_ip.txt.tmp, not saved_ip.tmp)
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        // Write to temp file
        std::fs::write(&temp_path, format!("{ip}\n")).map_err(StateError::Write)?;

        // Atomic rename (on most filesystems)
        std::fs::rename(&temp_path, path).map_err(StateError::Write)?;

        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        match content.trim().parse::<IpAddr>() {
            Ok(ip) => LoadResult::Loaded(ip),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Not an IP address: {e}"),
            },
        }
    }

    async fn save(&self, ip: IpAddr) -> Result<(), StateError> {
        let path = self.path.clone();

        // Use spawn_blocking to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || Self::save_blocking(&path, ip))
            .await
            .expect("spawn_blocking task panicked")
    }
}
