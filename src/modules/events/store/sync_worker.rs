// Background synchronization of one events store.
//
// Responsibilities
// - Reconcile the store with its backend on a fixed interval.
// - Apply change notices from other contexts as soon as they arrive.
// - Stop when the owning context drops its handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::modules::events::store::events_store::EventsStore;
use crate::shared::infrastructure::change_channel::{ChangeNotice, ChangeSubscription};

pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(5);

/// Owns the sync task. Dropping it aborts the task.
pub struct SyncHandle {
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Aborts the task and waits until it is gone.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Starts reconciling `store` every `every`, the first time one interval from now.
pub fn spawn_sync(
    store: Arc<EventsStore>,
    every: Duration,
    subscription: Option<ChangeSubscription>,
) -> SyncHandle {
    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut subscription = subscription;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = store.reconcile().await {
                        tracing::debug!(error = %err, "sync tick failed, keeping snapshot");
                    }
                }
                notice = next_notice(&mut subscription) => match notice {
                    Some(notice) => {
                        if let Err(err) = store.apply_change(&notice).await {
                            tracing::debug!(error = %err, key = %notice.key, "applying change notice failed");
                        }
                    }
                    None => {
                        tracing::debug!("change channel closed, polling only");
                        subscription = None;
                    }
                },
            }
        }
    });
    SyncHandle { task: Some(task) }
}

/// `spawn_sync` at the default five second cadence.
pub fn spawn_default_sync(
    store: Arc<EventsStore>,
    subscription: Option<ChangeSubscription>,
) -> SyncHandle {
    spawn_sync(store, DEFAULT_SYNC_INTERVAL, subscription)
}

async fn next_notice(subscription: &mut Option<ChangeSubscription>) -> Option<ChangeNotice> {
    match subscription {
        Some(subscription) => subscription.recv().await,
        None => std::future::pending().await,
    }
}
