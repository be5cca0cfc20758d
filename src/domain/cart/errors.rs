// ============================================================================
// Cart Business Rule Errors
// ============================================================================
//
// Commands never fail. These only surface when an event that does not fit
// the current state is applied directly.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartError {
    #[error("No cart line at index {index} (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    #[error("Cart line {index} holds item {found}, expected item {expected}")]
    LineMismatch { index: usize, expected: i64, found: i64 },

    #[error("Nothing to undo")]
    EmptyHistory,
}
