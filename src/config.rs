use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::persistence::DEFAULT_STORAGE_KEY;

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str() {
        if let Some(stripped) = s.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if s == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Configuration for cart-engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartConfig {
    /// Directory holding the cart snapshot
    #[serde(default = "defaults::storage_dir")]
    pub storage_dir: PathBuf,
    /// File stem of the snapshot document
    #[serde(default = "defaults::storage_key")]
    pub storage_key: String,
    /// JSON catalog to use instead of the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Tracing filter used when RUST_LOG is not set
    #[serde(default = "defaults::log_filter")]
    pub log_filter: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: defaults::storage_dir(),
            storage_key: defaults::storage_key(),
            catalog_path: None,
            log_filter: defaults::log_filter(),
        }
    }
}

impl CartConfig {
    /// Load configuration from the config file (if any) and environment variables
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match explicit_path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::config_file_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.with_env_overrides(|key| env::var(key).ok())
    }

    /// Apply CART_* overrides; `lookup` abstracts the environment
    fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup("CART_STORAGE_DIR") {
            self.storage_dir = expand_tilde(&PathBuf::from(dir));
        }

        if let Some(key) = lookup("CART_STORAGE_KEY") {
            if key.trim().is_empty() {
                anyhow::bail!("CART_STORAGE_KEY must not be empty");
            }
            self.storage_key = key;
        }

        if let Some(path) = lookup("CART_CATALOG") {
            self.catalog_path = Some(expand_tilde(&PathBuf::from(path)));
        }

        Ok(self)
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: CartConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.storage_dir = expand_tilde(&config.storage_dir);
        if let Some(ref catalog) = config.catalog_path {
            config.catalog_path = Some(expand_tilde(catalog));
        }

        Ok(config)
    }

    /// Default config file location
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/cart-engine/config.yaml"))
    }
}

mod defaults {
    use std::path::PathBuf;

    pub(crate) fn storage_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cart-engine")
    }

    pub(crate) fn storage_key() -> String {
        super::DEFAULT_STORAGE_KEY.to_string()
    }

    pub(crate) fn log_filter() -> String {
        "info,cart_engine=debug".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "cart-storage");
        assert!(config.storage_dir.ends_with("cart-engine"));
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storage_dir: /var/lib/cart\nstorage_key: session\n").unwrap();

        let config = CartConfig::load(Some(&path)).unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/cart"));
        assert_eq!(config.storage_key, "session");
        assert_eq!(config.log_filter, "info,cart_engine=debug");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storage_dirr: /tmp\n").unwrap();

        assert!(CartConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(CartConfig::load(Some(&dir.path().join("absent.yaml"))).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CART_STORAGE_DIR", "/srv/carts"),
            ("CART_STORAGE_KEY", "kiosk-7"),
            ("CART_CATALOG", "/srv/catalog.json"),
        ]);

        let config = CartConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/srv/carts"));
        assert_eq!(config.storage_key, "kiosk-7");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
    }

    #[test]
    fn test_blank_storage_key_override_is_rejected() {
        let result = CartConfig::default()
            .with_env_overrides(|key| (key == "CART_STORAGE_KEY").then(|| "  ".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde(Path::new("/abs/path")), PathBuf::from("/abs/path"));
    }
}
