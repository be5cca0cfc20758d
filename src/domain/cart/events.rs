use serde::{Deserialize, Serialize};

use crate::event_sourcing::DomainEvent;
use super::value_objects::CartItem;

// ============================================================================
// Cart Events - Domain Events for the Cart Aggregate
// ============================================================================

/// Cart Event - Union type for all cart events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    Hydrated(CartHydrated),
    ItemAdded(CartItemAdded),
    ItemRemoved(CartItemRemoved),
    CouponApplied(CartCouponApplied),
    LastActionUndone,
}

impl CartEvent {
    /// Undoable events record the pre-mutation items in the undo history.
    ///
    /// Only line additions and removals qualify. Hydration resets history,
    /// and coupon changes and undo itself stay out of it.
    pub fn is_undoable(&self) -> bool {
        matches!(self, CartEvent::ItemAdded(_) | CartEvent::ItemRemoved(_))
    }
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::Hydrated(_) => "CartHydrated",
            CartEvent::ItemAdded(_) => "CartItemAdded",
            CartEvent::ItemRemoved(_) => "CartItemRemoved",
            CartEvent::CouponApplied(_) => "CartCouponApplied",
            CartEvent::LastActionUndone => "CartLastActionUndone",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Cart Hydrated - state restored from a persisted snapshot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartHydrated {
    pub items: Vec<CartItem>,
    pub coupon_code: Option<String>,
}

/// Cart Item Added - a new line appended at the end
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartItemAdded {
    pub item: CartItem,
}

/// Cart Item Removed - the line at `index` (first match for `item_id`) dropped
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartItemRemoved {
    pub index: usize,
    pub item_id: i64,
}

/// Cart Coupon Applied - code stored as entered
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartCouponApplied {
    pub code: String,
}
