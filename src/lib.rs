//! Client-side shopping cart engine.
//!
//! A single [`CartAggregate`](domain::cart::CartAggregate) holds the cart's
//! items, coupon code and undo history and recomputes totals on every change.
//! [`CartCommandHandler`](domain::cart::CartCommandHandler) owns it for a
//! session and mirrors each change into a [`CartStore`](persistence::CartStore).

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;
pub mod persistence;
