use std::sync::Arc;
use uuid::Uuid;

use crate::event_sourcing::{Aggregate, EventEnvelope};
use crate::metrics::Metrics;
use crate::persistence::CartStore;

use super::aggregate::CartAggregate;
use super::commands::CartCommand;
use super::errors::CartError;
use super::events::CartEvent;
use super::value_objects::{CartItem, CartSnapshot};

// ============================================================================
// Cart Command Handler
// ============================================================================
//
// Orchestrates: Command → Aggregate → Events → Snapshot Store
//
// The handler is the single owner of the session's cart. Persistence is
// best-effort: load/save failures are logged and never reach the caller.
//
// ============================================================================

pub struct CartCommandHandler<S: CartStore> {
    cart: CartAggregate,
    store: S,
    metrics: Option<Arc<Metrics>>,
}

impl<S: CartStore> CartCommandHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            cart: CartAggregate::default(),
            store,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn cart(&self) -> &CartAggregate {
        &self.cart
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the persisted snapshot once at session start.
    ///
    /// Returns whether a snapshot was found and hydrated. An unreadable store
    /// leaves the cart empty.
    pub fn restore(&mut self) -> Result<bool, CartError> {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    item_count = snapshot.items.len(),
                    coupon_code = ?snapshot.coupon_code,
                    "Restoring cart from storage"
                );
                self.hydrate(snapshot)?;
                Ok(true)
            }
            Ok(None) => {
                tracing::debug!("No stored cart, starting empty");
                Ok(false)
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "Could not load cart from storage");
                if let Some(metrics) = &self.metrics {
                    metrics.record_persistence_failure("load");
                }
                Ok(false)
            }
        }
    }

    /// Handle a command, apply resulting events and persist the new snapshot
    pub fn handle(&mut self, command: CartCommand) -> Result<Vec<EventEnvelope<CartEvent>>, CartError> {
        let correlation_id = Uuid::new_v4();
        let kind = command.kind();

        let events = self.cart.execute(&command)?;

        if let Some(metrics) = &self.metrics {
            metrics.record_command(kind, !events.is_empty());
        }

        if events.is_empty() {
            tracing::debug!(command = kind, "Command left the cart unchanged");
            return Ok(Vec::new());
        }

        // Sequence numbers continue from the version before this command
        let first_seq = self.cart.version() - events.len() as i64 + 1;
        let envelopes: Vec<_> = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| {
                EventEnvelope::new(self.cart.aggregate_id(), first_seq + i as i64, event, correlation_id)
            })
            .collect();

        let totals = self.cart.totals();
        tracing::debug!(
            command = kind,
            version = self.cart.version(),
            item_count = self.cart.items().len(),
            total = totals.total,
            payable = totals.payable,
            "Cart updated"
        );

        if let Some(metrics) = &self.metrics {
            metrics.observe_cart(self.cart.items().len(), self.cart.history_depth(), totals.payable);
        }

        self.persist();
        Ok(envelopes)
    }

    pub fn hydrate(&mut self, snapshot: CartSnapshot) -> Result<Vec<EventEnvelope<CartEvent>>, CartError> {
        self.handle(CartCommand::Hydrate(snapshot))
    }

    pub fn add_item(&mut self, item: CartItem) -> Result<Vec<EventEnvelope<CartEvent>>, CartError> {
        self.handle(CartCommand::AddItem(item))
    }

    pub fn remove_item(&mut self, id: i64) -> Result<Vec<EventEnvelope<CartEvent>>, CartError> {
        self.handle(CartCommand::RemoveItem { id })
    }

    pub fn apply_coupon(&mut self, code: impl Into<String>) -> Result<Vec<EventEnvelope<CartEvent>>, CartError> {
        self.handle(CartCommand::ApplyCoupon { code: code.into() })
    }

    pub fn undo_last_action(&mut self) -> Result<Vec<EventEnvelope<CartEvent>>, CartError> {
        self.handle(CartCommand::UndoLastAction)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.cart.snapshot()) {
            tracing::warn!(error = %format!("{e:#}"), "Could not save cart to storage");
            if let Some(metrics) = &self.metrics {
                metrics.record_persistence_failure("save");
            }
        }
    }
}
