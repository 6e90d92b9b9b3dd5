use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

use crate::client::ApiState;
use crate::models::SubscriptionStatus;

/// Fixed polling cadence for the subscription page.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// SubscriptionWatcher
///
/// Polls the subscription endpoint on a fixed interval and whenever the tab
/// regains visibility. Each tick is an independent, idempotent fetch; there
/// is no deduplication, so a slow response can arrive after a newer request
/// was already issued. Such responses are discarded: every request carries a
/// monotonically increasing sequence number and only a response from the
/// latest issued request may be applied (explicit last-write-wins).
///
/// Dropping the watcher aborts the poll loop, so a torn-down consumer can
/// never receive further updates.
pub struct SubscriptionWatcher {
    tx: Arc<watch::Sender<Option<SubscriptionStatus>>>,
    refresh: Arc<Notify>,
    issued: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl SubscriptionWatcher {
    /// Start watching with the standard 30-second cadence.
    pub fn spawn(api: ApiState) -> Self {
        Self::spawn_with_interval(api, POLL_INTERVAL)
    }

    /// Start watching with a custom cadence (tests use a short one).
    pub fn spawn_with_interval(api: ApiState, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        let tx = Arc::new(tx);
        let refresh = Arc::new(Notify::new());
        let issued = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(poll_loop(
            api,
            tx.clone(),
            refresh.clone(),
            issued.clone(),
            interval,
        ));

        Self {
            tx,
            refresh,
            issued,
            task,
        }
    }

    /// Receiver for status updates. `None` until the first successful fetch.
    pub fn subscribe(&self) -> watch::Receiver<Option<SubscriptionStatus>> {
        self.tx.subscribe()
    }

    /// The most recently applied status, if any fetch has succeeded yet.
    pub fn latest(&self) -> Option<SubscriptionStatus> {
        self.tx.borrow().clone()
    }

    /// Trigger an immediate out-of-cycle fetch (tab regained visibility).
    pub fn visibility_regained(&self) {
        self.refresh.notify_one();
    }

    /// Sequence number of the most recently issued request.
    pub fn requests_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl Drop for SubscriptionWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop(
    api: ApiState,
    tx: Arc<watch::Sender<Option<SubscriptionStatus>>>,
    refresh: Arc<Notify>,
    issued: Arc<AtomicU64>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        // The first interval tick fires immediately, giving the initial fetch.
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => {}
        }

        let seq = issued.fetch_add(1, Ordering::SeqCst) + 1;
        let api = api.clone();
        let tx = tx.clone();
        let issued = issued.clone();

        // Fetches run detached so a slow response never delays the next tick.
        tokio::spawn(async move {
            match api.subscription().await {
                Ok(status) => {
                    // Apply only if no newer request has been issued since.
                    // The check and the write share the channel lock, so a
                    // newer response cannot slip in between them.
                    let applied = tx.send_if_modified(|current| {
                        if seq == issued.load(Ordering::SeqCst) {
                            *current = Some(status);
                            true
                        } else {
                            false
                        }
                    });
                    if !applied {
                        tracing::debug!(seq, "discarding stale subscription response");
                    }
                }
                Err(e) => {
                    // No retry, no backoff: the next tick fetches again.
                    tracing::warn!(seq, error = %e, "subscription poll failed");
                }
            }
        });
    }
}
