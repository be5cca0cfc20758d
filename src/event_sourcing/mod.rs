// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic aggregate/event abstractions.
// Domain-specific code is in src/domain/
//
// ============================================================================

mod core;

pub use self::core::*;
