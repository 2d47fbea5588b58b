//! DNS A-record resolution.
//!
//! This module provides:
//! - The [`ARecordResolver`] trait for looking up a hostname's A-records
//! - [`SystemResolver`], backed by the system DNS configuration
//! - [`ResolveError`] describing the failure modes

mod resolver;

pub use resolver::SystemResolver;

use std::net::Ipv4Addr;

use thiserror::Error;

/// Error type for DNS resolution.
///
/// NXDOMAIN, timeouts, and empty answers all abort the run; the
/// comparison cannot be completed without a reference set.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver could not be constructed from system configuration.
    #[error("Failed to initialize DNS resolver: {message}")]
    Init {
        /// Description of the underlying failure.
        message: String,
    },

    /// The lookup itself failed (NXDOMAIN, timeout, no answer, SERVFAIL).
    #[error("DNS lookup for '{domain}' failed: {message}")]
    Lookup {
        /// The hostname that was queried.
        domain: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// The lookup succeeded but the answer contained no A-records.
    #[error("No A-records found for '{domain}'")]
    NoRecords {
        /// The hostname that was queried.
        domain: String,
    },
}

/// Trait for resolving a hostname to its full set of IPv4 A-records.
///
/// The whole record set matters: the caller checks whether the current
/// external IP appears anywhere in it, not against a single fixed address.
pub trait ARecordResolver: Send + Sync {
    /// Resolves all A-records for the given hostname.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on NXDOMAIN, timeout, transport failure,
    /// or an empty answer set.
    fn resolve_a(
        &self,
        domain: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Ipv4Addr>, ResolveError>> + Send;
}
