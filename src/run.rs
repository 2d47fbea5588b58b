//! Application execution logic.
//!
//! This module wires the validated configuration to concrete components
//! and performs exactly one check pass. Repetition is delegated to an
//! external scheduler (cron, systemd timer) invoking the process anew.

use thiserror::Error;

use ipwatch::check::{self, CheckError, CheckOutcome, MessageComposer};
use ipwatch::config::{Mode, ValidatedConfig};
use ipwatch::dns::{ResolveError, SystemResolver};
use ipwatch::fetch::EchoIpFetcher;
use ipwatch::http::{HttpError, ReqwestClient};
use ipwatch::notify::PushoverNotifier;
use ipwatch::state::FileStateStore;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to construct the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] HttpError),

    /// Failed to construct the DNS resolver.
    #[error("Failed to create DNS resolver: {0}")]
    ResolverInit(#[source] ResolveError),

    /// The check itself aborted.
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// Executes a single check pass.
///
/// This function:
/// 1. Builds the HTTP client with the configured timeout
/// 2. Builds the IP fetcher and the notifier on top of it
/// 3. Runs the mode selected by the subcommand (dns or change)
/// 4. Logs the outcome
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client or DNS resolver cannot be constructed
/// - The IP fetch, the DNS lookup, or the saved-IP write fails
///
/// Notification failures are logged, not returned.
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ReqwestClient::with_timeout(config.timeout).map_err(RunError::ClientBuild)?;

    let fetcher = EchoIpFetcher::new(client.clone(), config.ip_endpoint.clone());
    let notifier = PushoverNotifier::new(
        client,
        config.pushover_api_url.clone(),
        config.credentials.clone(),
    );
    let composer = MessageComposer::new(config.message_template.clone());

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - notifications will be logged but not sent");
    }

    let outcome = match &config.mode {
        Mode::Dns { domain } => {
            let resolver =
                SystemResolver::new(config.timeout).map_err(RunError::ResolverInit)?;
            check::dns_check(
                &fetcher,
                &resolver,
                &notifier,
                domain,
                &composer,
                config.dry_run,
            )
            .await?
        }
        Mode::Change { state_file } => {
            let store = FileStateStore::new(state_file);
            tracing::info!("Saved-IP file: {}", store.path().display());
            check::change_check(&fetcher, &store, &notifier, &composer, config.dry_run).await?
        }
    };

    log_outcome(outcome);
    Ok(())
}

/// Logs the final outcome of a completed check.
fn log_outcome(outcome: CheckOutcome) {
    match outcome {
        CheckOutcome::InSync => tracing::info!("External IP is in sync"),
        CheckOutcome::FirstRun => tracing::info!("Reference recorded, nothing to compare yet"),
        CheckOutcome::Mismatch { notified: true } => {
            tracing::info!("Mismatch detected and reported");
        }
        CheckOutcome::Mismatch { notified: false } => {
            tracing::warn!("Mismatch detected, notification not delivered");
        }
    }
}
