use super::value_objects::{CartItem, CartSnapshot};

// ============================================================================
// Cart Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Replace items and coupon code with a restored snapshot
    Hydrate(CartSnapshot),
    /// Append a line, even if the same product is already in the cart
    AddItem(CartItem),
    /// Remove the first line whose product id matches
    RemoveItem { id: i64 },
    /// Store a coupon code verbatim, known or not
    ApplyCoupon { code: String },
    /// Restore the items captured before the last add/remove
    UndoLastAction,
}

impl CartCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            CartCommand::Hydrate(_) => "hydrate",
            CartCommand::AddItem(_) => "add_item",
            CartCommand::RemoveItem { .. } => "remove_item",
            CartCommand::ApplyCoupon { .. } => "apply_coupon",
            CartCommand::UndoLastAction => "undo_last_action",
        }
    }
}
