//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::config::MIN_CLEANUP_INTERVAL;

// == Cleanup Handle ==
/// Owner side of a running cleanup task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct CleanupHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Signals the task to stop. Calling this more than once is harmless.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CleanupHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The interval is floored at [`MIN_CLEANUP_INTERVAL`]. The task only holds a
/// weak reference to the store and exits at its next tick once the store has
/// been dropped, or as soon as [`CleanupHandle::shutdown`] is called.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::new(Duration::from_secs(30)));
/// let cleanup = spawn_cleanup_task(Arc::downgrade(&store), Duration::from_secs(5));
/// // Later:
/// cleanup.shutdown();
/// ```
pub fn spawn_cleanup_task<V>(
    store: Weak<CacheStore<V>>,
    cleanup_interval: Duration,
) -> CleanupHandle
where
    V: Send + Sync + 'static,
{
    let interval = cleanup_interval.max(MIN_CLEANUP_INTERVAL);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(store) = store.upgrade() else {
                        debug!("Cache dropped, stopping TTL cleanup task");
                        break;
                    };

                    let removed = store.cleanup_expired();
                    if removed > 0 {
                        info!("TTL cleanup: removed {} expired entries", removed);
                    } else {
                        debug!("TTL cleanup: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // Err means the handle is gone
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("TTL cleanup task shutting down");
                        break;
                    }
                }
            }
        }
    });

    CleanupHandle { shutdown_tx, task }
}
