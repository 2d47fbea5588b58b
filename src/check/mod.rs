//! Comparison and orchestration logic.
//!
//! This module implements the two one-shot check procedures:
//! - [`dns_check`]: compare the external IP against a domain's A-records
//! - [`change_check`]: compare the external IP against the saved value
//!
//! Both are generic over the trait seams ([`IpFetcher`], [`ARecordResolver`],
//! [`StateStore`], [`Notifier`]) so the decision logic is testable without
//! any network or filesystem access.

mod message;


pub use message::MessageComposer;

use std::net::IpAddr;

use thiserror::Error;

use crate::dns::{ARecordResolver, ResolveError};
use crate::fetch::{FetchError, IpFetcher};
use crate::notify::Notifier;
use crate::state::{LoadResult, StateError, StateStore};

/// Error type for an aborted check.
///
/// Any of these means the comparison could not be completed; the run
/// stops immediately and nothing is notified or persisted beyond what
/// already happened.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The external IP could not be determined.
    #[error("Failed to fetch external IP: {0}")]
    Fetch(#[from] FetchError),

    /// The DNS reference could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The saved-IP file could not be written.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Outcome of a completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The current IP matches the reference; nothing to report.
    InSync,

    /// Change mode only: no previous value existed. The current IP was
    /// recorded as the new reference and no notification was sent.
    FirstRun,

    /// The current IP differs from the reference.
    Mismatch {
        /// Whether the notification was actually delivered.
        /// `false` on delivery failure or in dry-run mode.
        notified: bool,
    },
}

/// Compares the external IP against the A-record set of `domain`.
///
/// The IP is in sync if it appears anywhere in the record set. On
/// mismatch, exactly one notification is sent describing the current
/// IP and the full expected set.
///
/// # Errors
///
/// Returns [`CheckError`] if the IP fetch or the DNS lookup fails.
/// Notification failures are logged, not returned.
pub async fn dns_check<F, R, N>(
    fetcher: &F,
    resolver: &R,
    notifier: &N,
    domain: &str,
    composer: &MessageComposer,
    dry_run: bool,
) -> Result<CheckOutcome, CheckError>
where
    F: IpFetcher,
    R: ARecordResolver,
    N: Notifier,
{
    let current = fetcher.fetch().await?;
    tracing::debug!("External IP: {current}");

    let records = resolver.resolve_a(domain).await?;
    tracing::debug!("A-records for {domain}: {records:?}");

    // An IPv6 answer from the echo service can never match an A-record set
    let in_sync = match current {
        IpAddr::V4(v4) => records.contains(&v4),
        IpAddr::V6(_) => false,
    };

    if in_sync {
        tracing::info!("Match - domain={domain} external_ip={current}");
        return Ok(CheckOutcome::InSync);
    }

    tracing::warn!("Mismatch - domain={domain} external_ip={current} a_records={records:?}");

    let message = composer.dns_mismatch(domain, current, &records);
    let notified = send_notification(notifier, &message, dry_run).await;

    Ok(CheckOutcome::Mismatch { notified })
}

/// Compares the external IP against the previously saved value.
///
/// A missing (or unreadable) saved value is a first run: the current IP
/// is recorded and nothing is notified. On change, the new IP is
/// persisted first, then exactly one notification is sent describing
/// old and new value.
///
/// # Errors
///
/// Returns [`CheckError`] if the IP fetch fails or the saved-IP file
/// cannot be written. Notification failures are logged, not returned.
pub async fn change_check<F, S, N>(
    fetcher: &F,
    store: &S,
    notifier: &N,
    composer: &MessageComposer,
    dry_run: bool,
) -> Result<CheckOutcome, CheckError>
where
    F: IpFetcher,
    S: StateStore,
    N: Notifier,
{
    let current = fetcher.fetch().await?;
    tracing::debug!("External IP: {current}");

    let previous = match store.load() {
        LoadResult::Loaded(prev) => Some(prev),
        LoadResult::NotFound => {
            tracing::info!("No previous IP recorded, starting fresh");
            None
        }
        LoadResult::Corrupted { reason } => {
            tracing::warn!("Saved-IP file corrupted ({reason}), treating as first run");
            None
        }
    };

    let Some(previous) = previous else {
        store.save(current).await?;
        tracing::info!("External IP {current} saved");
        return Ok(CheckOutcome::FirstRun);
    };

    if previous == current {
        tracing::info!("Match - previous={previous} current={current}");
        return Ok(CheckOutcome::InSync);
    }

    // Optimistic save: the file reflects the actual current IP
    // regardless of whether the notification goes through
    store.save(current).await?;

    tracing::warn!("Mismatch - previous={previous} current={current}");

    let message = composer.change_mismatch(previous, current);
    let notified = send_notification(notifier, &message, dry_run).await;

    Ok(CheckOutcome::Mismatch { notified })
}

/// Sends the mismatch notification, best-effort.
///
/// Returns whether the message was actually delivered. Failures are
/// logged as warnings; the comparison outcome already stands.
async fn send_notification<N: Notifier>(notifier: &N, message: &str, dry_run: bool) -> bool {
    if dry_run {
        tracing::info!("Dry-run: skipping notification");
        tracing::debug!("Suppressed message: {message}");
        return false;
    }

    match notifier.notify(message).await {
        Ok(()) => {
            tracing::debug!("Notification delivered");
            true
        }
        Err(e) => {
            tracing::warn!("Notification failed: {e}");
            false
        }
    }
}
