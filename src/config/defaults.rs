//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default IP echo endpoint.
pub const IP_ENDPOINT: &str = "https://api.ipify.org";

/// Default Pushover message API endpoint.
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Default timeout for each external call, in seconds.
pub const TIMEOUT_SECS: u64 = 10;

/// Default timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default saved-IP file path under the platform config directory.
///
/// Returns `None` when the platform has no config directory (rare,
/// e.g. stripped-down containers without `$HOME`).
#[must_use]
pub fn state_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ipwatch").join("saved_ip.txt"))
}
