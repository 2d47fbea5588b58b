//! Push notification layer.
//!
//! This module provides:
//! - The [`Notifier`] trait for delivering a mismatch alert
//! - [`PushoverNotifier`], which posts to the Pushover message API
//! - [`NotifyError`] describing the failure modes
//!
//! Notification is best-effort by design: the comparison outcome has
//! already been determined when a notifier runs, so a delivery failure
//! is logged by the caller but never aborts the run. There is no retry;
//! the next scheduled invocation will re-detect a persisting mismatch.

mod pushover;

#[cfg(test)]
#[path = "pushover_tests.rs"]
mod tests;

pub use pushover::{PushoverCredentials, PushoverNotifier};

use thiserror::Error;

use crate::http::HttpError;

/// Error type for notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The HTTP request to the notification API failed.
    #[error("Notification request failed: {0}")]
    Http(#[from] HttpError),

    /// The API answered with a non-success status.
    ///
    /// Covers authentication failures (invalid token or user key)
    /// as well as provider-side errors.
    #[error("Notification API returned status {status}: {}", body.as_deref().unwrap_or("<no body>"))]
    Api {
        /// The status code received.
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8.
        body: Option<String>,
    },
}

/// Trait for sending a push notification.
///
/// Implementations perform exactly one bounded-timeout delivery attempt.
pub trait Notifier: Send + Sync {
    /// Sends the given message to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the delivery attempt fails.
    fn notify(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// Mock notifier for testing.
#[cfg(test)]
pub mod mock {
    use super::{NotifyError, Notifier};
    use std::sync::Mutex;

    /// A mock implementation of [`Notifier`] capturing sent messages.
    #[derive(Debug, Default)]
    pub struct MockNotifier {
        fail: bool,
        messages: Mutex<Vec<String>>,
    }

    impl MockNotifier {
        /// Creates a mock that accepts every message.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mock whose every delivery attempt fails.
        #[must_use]
        pub fn failing() -> Self {
            Self {
                fail: true,
                messages: Mutex::new(Vec::new()),
            }
        }

        /// Returns every message passed to `notify`, in call order.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn sent_messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }

        /// Returns how many delivery attempts were made.
        #[must_use]
        pub fn attempts(&self) -> usize {
            self.messages.lock().unwrap().len()
        }
    }

    impl Notifier for MockNotifier {
        async fn notify(&self, message: &str) -> Result<(), NotifyError> {
            self.messages.lock().unwrap().push(message.to_string());
            if self.fail {
                return Err(NotifyError::Api {
                    status: http::StatusCode::UNAUTHORIZED,
                    body: Some(r#"{"errors":["application token is invalid"]}"#.to_string()),
                });
            }
            Ok(())
        }
    }
}
