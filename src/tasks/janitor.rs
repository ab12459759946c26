//! Cache Janitor
//!
//! Background task that periodically removes expired entries from every
//! named cache, whether or not anyone reads them again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::registry::CacheRegistry;

/// Runs `cleanup` on every store in the registry and returns the total removed.
///
/// Each store is locked on its own for the duration of its sweep; stores are
/// never locked together.
pub async fn sweep(registry: &CacheRegistry) -> usize {
    let mut total = 0;

    for (domain, store) in registry.iter() {
        let removed = store.write().await.cleanup();
        if removed > 0 {
            debug!(domain = %domain, removed, "swept expired entries");
        }
        total += removed;
    }

    total
}

/// Spawns a background task that sweeps all caches every `interval`.
///
/// The first sweep happens one full interval after spawning. The returned
/// handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let registry = CacheRegistry::from_config(&config);
/// let janitor = spawn_janitor(registry.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// janitor.abort();
/// ```
pub fn spawn_janitor(registry: CacheRegistry, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache janitor with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = sweep(&registry).await;
            if removed > 0 {
                info!("Cache janitor: removed {} expired entries", removed);
            } else {
                debug!("Cache janitor: no expired entries found");
            }
        }
    })
}
