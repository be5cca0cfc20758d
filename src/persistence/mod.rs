// ============================================================================
// Persistence - Cart Snapshot Storage
// ============================================================================
//
// The engine only decides WHAT is persisted (a CartSnapshot). Where it lives
// is up to the CartStore implementation:
// - JsonFileStore:   one JSON document on disk, keyed by a fixed storage key
// - InMemoryStore:   the same document held in memory
// - BackgroundStore: fire-and-forget writes on a worker, wrapping another store
//
// ============================================================================

mod background;
mod file;
mod memory;

pub use background::BackgroundStore;
pub use file::{JsonFileStore, DEFAULT_STORAGE_KEY};
pub use memory::InMemoryStore;

use anyhow::Result;

use crate::domain::cart::CartSnapshot;

/// Storage for the single persisted cart snapshot
pub trait CartStore: Send + Sync {
    /// Read the stored snapshot, `None` when nothing was stored yet
    fn load(&self) -> Result<Option<CartSnapshot>>;

    /// Replace the stored snapshot
    fn save(&self, snapshot: &CartSnapshot) -> Result<()>;
}

impl<T: CartStore + ?Sized> CartStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}
