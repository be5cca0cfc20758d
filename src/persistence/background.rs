use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::CartStore;
use crate::domain::cart::CartSnapshot;
use crate::metrics::Metrics;

// ============================================================================
// Background Store - Fire-and-forget snapshot writes
// ============================================================================
//
// `save` only enqueues; a blocking worker writes through the inner store.
// The in-memory cart is authoritative, so when several snapshots are queued
// only the newest one is written. Write failures are logged and dropped;
// the next save is the natural retry.
//
// ============================================================================

pub struct BackgroundStore<S: CartStore + 'static> {
    inner: Arc<S>,
    sender: mpsc::UnboundedSender<CartSnapshot>,
    worker: JoinHandle<()>,
}

impl<S: CartStore + 'static> BackgroundStore<S> {
    /// Start the writer. Must be called from within a tokio runtime.
    pub fn spawn(inner: S, metrics: Option<Arc<Metrics>>) -> Self {
        let inner = Arc::new(inner);
        let (sender, mut receiver) = mpsc::unbounded_channel::<CartSnapshot>();
        let writer = inner.clone();

        let worker = tokio::task::spawn_blocking(move || {
            while let Some(mut snapshot) = receiver.blocking_recv() {
                let mut skipped = 0usize;
                while let Ok(newer) = receiver.try_recv() {
                    snapshot = newer;
                    skipped += 1;
                }
                if skipped > 0 {
                    tracing::debug!(skipped, "Coalesced queued cart snapshots");
                }

                if let Err(e) = writer.save(&snapshot) {
                    tracing::warn!(error = %format!("{e:#}"), "Could not save cart to storage");
                    if let Some(metrics) = &metrics {
                        metrics.record_persistence_failure("save");
                    }
                }
            }
            tracing::debug!("Cart snapshot writer stopped");
        });

        Self { inner, sender, worker }
    }

    /// Stop accepting snapshots and wait until the last one is written
    pub async fn shutdown(self) {
        let Self { sender, worker, .. } = self;
        drop(sender);
        if let Err(e) = worker.await {
            tracing::warn!(error = %e, "Cart snapshot writer did not finish cleanly");
        }
    }
}

impl<S: CartStore + 'static> CartStore for BackgroundStore<S> {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        self.inner.load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        self.sender
            .send(snapshot.clone())
            .map_err(|_| anyhow!("Cart snapshot writer has stopped"))
    }
}
