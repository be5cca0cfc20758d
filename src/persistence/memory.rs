use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::CartStore;
use crate::domain::cart::CartSnapshot;

/// Keeps the serialized snapshot in memory.
///
/// Stores the encoded document rather than the struct so decoding behaves
/// exactly like the file store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored document, valid or not
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CartStore for InMemoryStore {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        let document = self
            .document
            .lock()
            .map_err(|_| anyhow!("In-memory cart store lock poisoned"))?;

        document.as_deref().map(CartSnapshot::from_json).transpose()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        let mut document = self
            .document
            .lock()
            .map_err(|_| anyhow!("In-memory cart store lock poisoned"))?;

        *document = Some(json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
