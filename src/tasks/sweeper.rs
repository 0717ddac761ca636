//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::service::CacheService;

/// Handle to a running sweeper.
///
/// Dropping the handle closes the shutdown channel, which also stops the task.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweeper to stop and waits for the current pass to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!("Sweeper task ended abnormally: {e}");
        }
    }
}

/// Spawns a background task that purges expired entries every `interval`.
///
/// Passes run one at a time inside a single task and each takes the cache's
/// write lock once, so a pass is indistinguishable from a batch of deletes.
/// Ticks missed while a pass is running are skipped, not queued.
///
/// # Example
/// ```ignore
/// let cache = CacheService::new(1000)?;
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweeper(cache: CacheService, interval: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    let task = tokio::spawn(async move {
        info!("Starting expiry sweeper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; start sweeping one interval in.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.cleanup();
                    if removed > 0 {
                        info!("Expiry sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Expiry sweeper stopping");
                    break;
                }
            }
        }
    });

    SweeperHandle { shutdown_tx, task }
}
