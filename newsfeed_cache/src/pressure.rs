//! Flushing the memory tier when the host reports memory pressure.
//!
//! The store knows nothing about where pressure signals come from. The
//! owner of the store wires a channel to it here and feeds the channel
//! from whatever the platform offers.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::store::CacheStore;

/// Severity reported by the host. Every level flushes the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryPressure {
    Warning,
    Critical,
}

/// Spawns a task that calls `remove_all` on `store` for every signal
/// received. The task exits once all senders are dropped.
pub fn spawn_pressure_listener<C>(
    store: Arc<C>,
    mut signals: mpsc::Receiver<MemoryPressure>,
) -> JoinHandle<()>
where
    C: CacheStore + 'static,
{
    tokio::spawn(async move {
        while let Some(level) = signals.recv().await {
            tracing::info!("Memory pressure ({:?}), flushing news cache", level);
            store.remove_all();
        }
    })
}
