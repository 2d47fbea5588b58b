//! Production DNS resolver using hickory-resolver.

use std::net::Ipv4Addr;
use std::time::Duration;

use hickory_resolver::TokioResolver;

use super::{ARecordResolver, ResolveError};

/// A-record resolver backed by the system DNS configuration.
///
/// Reads nameservers from the platform's resolver configuration
/// (`/etc/resolv.conf` on Unix) and applies a bounded per-query timeout.
#[derive(Debug)]
pub struct SystemResolver {
    inner: TokioResolver,
}

impl SystemResolver {
    /// Creates a resolver from system configuration with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Init`] if the system resolver configuration
    /// cannot be read.
    pub fn new(timeout: Duration) -> Result<Self, ResolveError> {
        let mut builder = TokioResolver::builder_tokio().map_err(|e| ResolveError::Init {
            message: e.to_string(),
        })?;
        builder.options_mut().timeout = timeout;

        Ok(Self {
            inner: builder.build(),
        })
    }
}

impl ARecordResolver for SystemResolver {
    async fn resolve_a(&self, domain: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        // NXDOMAIN, timeouts, and empty answers all surface as lookup errors
        let lookup = self
            .inner
            .ipv4_lookup(domain)
            .await
            .map_err(|e| ResolveError::Lookup {
                domain: domain.to_string(),
                message: e.to_string(),
            })?;

        let records: Vec<Ipv4Addr> = lookup.iter().map(|a| a.0).collect();

        if records.is_empty() {
            return Err(ResolveError::NoRecords {
                domain: domain.to_string(),
            });
        }

        Ok(records)
    }
}
