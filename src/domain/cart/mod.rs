// ============================================================================
// Cart Domain - Business Logic for the Cart Aggregate
// ============================================================================
//
// This module contains ALL cart-specific code:
// - Value objects (CartItem, CartSnapshot)
// - Pricing (coupon table, threshold discount, CartTotals)
// - Undo history
// - Events, Commands, Errors
// - Aggregate (CartAggregate with business logic)
// - Command Handler (CartCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod pricing;
pub mod history;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use pricing::*;
pub use history::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
