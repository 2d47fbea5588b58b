//! IP fetcher backed by an HTTP echo service.

use std::net::IpAddr;

use crate::http::{HttpClient, HttpRequest};

use super::{FetchError, IpFetcher};

/// Fetches the external IP address from an HTTP echo service.
///
/// The service is expected to answer a plain GET with the caller's
/// public address as the response body (e.g. `https://api.ipify.org`).
/// Surrounding whitespace is tolerated; anything else in the body is
/// treated as an invalid answer.
#[derive(Debug, Clone)]
pub struct EchoIpFetcher<H> {
    client: H,
    endpoint: url::Url,
}

impl<H> EchoIpFetcher<H> {
    /// Creates a fetcher that queries the given echo endpoint.
    #[must_use]
    pub const fn new(client: H, endpoint: url::Url) -> Self {
        Self { client, endpoint }
    }

    /// Returns the configured echo endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

impl<H: HttpClient> IpFetcher for EchoIpFetcher<H> {
    async fn fetch(&self) -> Result<IpAddr, FetchError> {
        let request = HttpRequest::get(self.endpoint.clone());
        let response = self.client.request(request).await?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        let body = response.body_text().unwrap_or_default().trim().to_string();

        body.parse::<IpAddr>()
            .map_err(|_| FetchError::InvalidAddress { body })
    }
}
