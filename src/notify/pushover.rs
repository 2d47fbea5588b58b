//! Pushover notifier implementation.

use serde::Serialize;

use crate::http::{HttpClient, HttpRequest};

use super::{NotifyError, Notifier};

/// Credentials and delivery options for the Pushover API.
///
/// The user key identifies the recipient, the token identifies the
/// sending application. Both come from the configuration file and are
/// never logged.
#[derive(Debug, Clone)]
pub struct PushoverCredentials {
    /// Recipient user key.
    pub user_key: String,
    /// Application API token.
    pub token: String,
    /// Notification sound, if the default should be overridden.
    pub sound: Option<String>,
}

/// Request body for the Pushover message endpoint.
#[derive(Serialize)]
struct PushoverMessage<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<&'a str>,
}

/// Push notifier backed by the Pushover message API.
///
/// Sends a single POST with a JSON body per notification. Delivery
/// beyond the API's 2xx acknowledgement is the provider's concern.
///
/// # Example
///
/// ```
/// use ipwatch::notify::{PushoverCredentials, PushoverNotifier};
/// use ipwatch::http::ReqwestClient;
/// use url::Url;
///
/// let notifier = PushoverNotifier::new(
///     ReqwestClient::new(),
///     Url::parse("https://api.pushover.net/1/messages.json").unwrap(),
///     PushoverCredentials {
///         user_key: "uk".to_string(),
///         token: "tk".to_string(),
///         sound: None,
///     },
/// );
/// ```
#[derive(Debug)]
pub struct PushoverNotifier<H> {
    client: H,
    api_url: url::Url,
    credentials: PushoverCredentials,
}

impl<H> PushoverNotifier<H> {
    /// Creates a notifier for the given API endpoint and credentials.
    #[must_use]
    pub const fn new(client: H, api_url: url::Url, credentials: PushoverCredentials) -> Self {
        Self {
            client,
            api_url,
            credentials,
        }
    }

    /// Returns the configured API endpoint.
    #[must_use]
    pub const fn api_url(&self) -> &url::Url {
        &self.api_url
    }

    /// Builds the HTTP request for the given message.
    fn build_request(&self, message: &str) -> HttpRequest {
        let body = PushoverMessage {
            token: &self.credentials.token,
            user: &self.credentials.user_key,
            message,
            sound: self.credentials.sound.as_deref(),
        };

        // Serialization of a struct of strings cannot fail
        let payload = serde_json::to_vec(&body).expect("message payload serializes");

        HttpRequest::post(self.api_url.clone())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_body(payload)
    }
}

impl<H: HttpClient> Notifier for PushoverNotifier<H> {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let request = self.build_request(message);
        let response = self.client.request(request).await?;

        if response.is_success() {
            return Ok(());
        }

        Err(NotifyError::Api {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }
}
