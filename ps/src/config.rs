//! Configuration for productshelf

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the slot store directory
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Path to the catalog document
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("productshelf")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("products.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("productshelf").join("config.yml")),
            Some(PathBuf::from("productshelf.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yml");

        let config = Config {
            store_path: PathBuf::from("/tmp/shelf"),
            catalog_path: PathBuf::from("/tmp/products.json"),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.store_path, PathBuf::from("/tmp/shelf"));
        assert_eq!(loaded.catalog_path, PathBuf::from("/tmp/products.json"));
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "store_path: /tmp/shelf\n").unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.store_path, PathBuf::from("/tmp/shelf"));
        assert_eq!(loaded.catalog_path, PathBuf::from("products.json"));
    }
}
