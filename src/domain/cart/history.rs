use super::value_objects::CartItem;

// ============================================================================
// Undo History
// ============================================================================
//
// Stack of item lists captured right before each undoable mutation. Only
// items are recorded; the coupon code is never part of a history entry.
//
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoHistory {
    snapshots: Vec<Vec<CartItem>>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, items: &[CartItem]) {
        self.snapshots.push(items.to_vec());
    }

    pub fn pop(&mut self) -> Option<Vec<CartItem>> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
