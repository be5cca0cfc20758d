use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::CartStore;
use crate::domain::cart::CartSnapshot;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// Stores the snapshot as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(base_path: P, key: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Path of the snapshot document
    pub fn path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", self.key))
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Option<CartSnapshot>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cart snapshot: {:?}", path))?;
        let snapshot = CartSnapshot::from_json(&content)
            .with_context(|| format!("Corrupt cart snapshot: {:?}", path))?;

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        fs::create_dir_all(&self.base_path)
            .with_context(|| format!("Failed to create storage directory: {:?}", self.base_path))?;

        // 1. Write to temp file
        let temp_path = self.temp_path();
        fs::write(&temp_path, snapshot.to_json()?)
            .with_context(|| format!("Failed to write cart snapshot: {:?}", temp_path))?;

        // 2. Atomic rename over the previous snapshot
        let path = self.path();
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace cart snapshot: {:?}", path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_no_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), DEFAULT_STORAGE_KEY);

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"), DEFAULT_STORAGE_KEY);
        let snapshot = CartSnapshot::new(
            vec![
                CartItem::new(1, "Apple", 100.0, "fruits").with_image("/apple.png"),
                CartItem::new(1, "Apple", 100.0, "fruits"),
            ],
            Some("WELCOME10".to_string()),
        );

        store.save(&snapshot).unwrap();

        assert!(store.path().ends_with("nested/cart-storage.json"));
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), "cart");

        store
            .save(&CartSnapshot::new(vec![CartItem::new(1, "Apple", 1.0, "fruits")], None))
            .unwrap();
        store.save(&CartSnapshot::default()).unwrap();

        assert_eq!(store.load().unwrap(), Some(CartSnapshot::default()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), DEFAULT_STORAGE_KEY);
        fs::write(store.path(), "{\"items\": [").unwrap();

        let err = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("Corrupt cart snapshot"));
    }

    #[test]
    fn test_reads_documents_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), DEFAULT_STORAGE_KEY);
        fs::write(
            store.path(),
            r#"{"items":[{"id":4,"name":"Butter","price":55.5,"category":"dairy","image":"/b.png"}],"couponCode":null,"theme":"dark"}"#,
        )
        .unwrap();

        let snapshot = store.load().unwrap().unwrap();
        assert_eq!(snapshot.items[0].image.as_deref(), Some("/b.png"));
        assert_eq!(snapshot.coupon_code, None);
    }
}
