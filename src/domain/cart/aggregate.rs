use uuid::Uuid;

use crate::event_sourcing::Aggregate;
use super::commands::CartCommand;
use super::errors::CartError;
use super::events::*;
use super::history::UndoHistory;
use super::pricing::CartTotals;
use super::value_objects::{CartItem, CartSnapshot};

// ============================================================================
// Cart Aggregate - Domain Logic
// ============================================================================
//
// Fields are private: state changes only through `apply_event`, and every
// applied event leaves the derived totals recomputed from items + coupon.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct CartAggregate {
    // Identity
    id: Uuid,
    version: i64,

    // Current State
    items: Vec<CartItem>,
    coupon_code: Option<String>,
    history: UndoHistory,

    // Derived from items + coupon_code
    totals: CartTotals,
}

impl Default for CartAggregate {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl CartAggregate {
    /// Empty cart for a new session
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            items: Vec::new(),
            coupon_code: None,
            history: UndoHistory::new(),
            totals: CartTotals::default(),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// The persisted subset of state
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.items.clone(), self.coupon_code.clone())
    }

    fn recalculate(&mut self) {
        self.totals = CartTotals::calculate(&self.items, self.coupon_code.as_deref());
    }

    fn check_removal(&self, removal: &CartItemRemoved) -> Result<(), CartError> {
        match self.items.get(removal.index) {
            None => Err(CartError::LineOutOfRange {
                index: removal.index,
                len: self.items.len(),
            }),
            Some(line) if line.id != removal.item_id => Err(CartError::LineMismatch {
                index: removal.index,
                expected: removal.item_id,
                found: line.id,
            }),
            Some(_) => Ok(()),
        }
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for CartAggregate {
    type Event = CartEvent;
    type Command = CartCommand;
    type Error = CartError;

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        // Validate before touching anything so a rejected event is a no-op
        match event {
            CartEvent::ItemRemoved(e) => self.check_removal(e)?,
            CartEvent::LastActionUndone if self.history.is_empty() => {
                return Err(CartError::EmptyHistory)
            }
            _ => {}
        }

        if event.is_undoable() {
            self.history.record(&self.items);
        }

        match event {
            CartEvent::Hydrated(e) => {
                self.items = e.items.clone();
                self.coupon_code = e.coupon_code.clone();
                self.history.clear();
            }
            CartEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            CartEvent::ItemRemoved(e) => {
                self.items.remove(e.index);
            }
            CartEvent::CouponApplied(e) => {
                self.coupon_code = Some(e.code.clone());
            }
            CartEvent::LastActionUndone => {
                if let Some(previous) = self.history.pop() {
                    self.items = previous;
                }
            }
        }

        self.version += 1;
        self.recalculate();
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::Hydrate(snapshot) => {
                // An empty stored code means no code
                let coupon_code = snapshot.coupon_code.clone().filter(|code| !code.is_empty());

                Ok(vec![CartEvent::Hydrated(CartHydrated {
                    items: snapshot.items.clone(),
                    coupon_code,
                })])
            }

            CartCommand::AddItem(item) => Ok(vec![CartEvent::ItemAdded(CartItemAdded {
                item: item.clone(),
            })]),

            CartCommand::RemoveItem { id } => {
                let Some(index) = self.items.iter().position(|line| line.id == *id) else {
                    tracing::debug!(item_id = id, "No cart line for item, nothing removed");
                    return Ok(vec![]);
                };

                Ok(vec![CartEvent::ItemRemoved(CartItemRemoved {
                    index,
                    item_id: *id,
                })])
            }

            CartCommand::ApplyCoupon { code } => {
                Ok(vec![CartEvent::CouponApplied(CartCouponApplied { code: code.clone() })])
            }

            CartCommand::UndoLastAction => {
                if self.history.is_empty() {
                    tracing::debug!("Undo requested with empty history");
                    return Ok(vec![]);
                }
                Ok(vec![CartEvent::LastActionUndone])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
