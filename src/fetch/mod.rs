//! External IP fetching.
//!
//! This module provides:
//! - The [`IpFetcher`] trait for obtaining the caller's public IP address
//! - [`EchoIpFetcher`], which asks an HTTP IP-echo service
//! - [`FetchError`] describing the failure modes

mod echo;

#[cfg(test)]
#[path = "echo_tests.rs"]
mod tests;

pub use echo::EchoIpFetcher;

use std::net::IpAddr;

use thiserror::Error;

use crate::http::HttpError;

/// Error type for external IP fetching.
///
/// Any of these aborts the current run; the next scheduled invocation
/// is the retry mechanism.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request to the echo service failed.
    #[error("IP echo request failed: {0}")]
    Http(#[from] HttpError),

    /// The echo service answered with a non-success status.
    #[error("IP echo service returned status {status}")]
    Status {
        /// The status code received.
        status: http::StatusCode,
    },

    /// The echo service answered, but the body is not an IP address.
    #[error("IP echo service returned an invalid address: '{body}'")]
    InvalidAddress {
        /// The (trimmed) response body.
        body: String,
    },
}

/// Trait for determining the caller's current external IP address.
///
/// # Design
///
/// - Implementations perform exactly one bounded-timeout attempt
/// - Enables dependency injection for testing with mock implementations
pub trait IpFetcher: Send + Sync {
    /// Fetches the current external IP address.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the echo service is unreachable, times
    /// out, answers with a non-success status, or returns a body that does
    /// not parse as an IP address.
    fn fetch(&self) -> impl std::future::Future<Output = Result<IpAddr, FetchError>> + Send;
}
