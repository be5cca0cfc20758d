// ============================================================================
// Event Sourcing Core - Generic Abstractions
// ============================================================================
//
// GENERIC, reusable command/event infrastructure:
// - No domain-specific code (no Cart, Coupon, etc.)
// - Generic over aggregate types
//
// ============================================================================

pub mod aggregate;
pub mod event;

// Re-export core types for convenience
pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope};
