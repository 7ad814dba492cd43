//! Path management for confcat files.
//!
//! ```text
//! ~/.config/confcat/          # Config directory (platform dependent)
//! ├── config.toml             # Application configuration
//! └── catalog.json            # Catalog snapshot (default location)
//! ```

use std::path::PathBuf;

use confcat_core::config::AppConfig;
use confcat_core::error::{ConfcatError, Result};

const APP_DIR: &str = "confcat";
const CONFIG_FILENAME: &str = "config.toml";
const CATALOG_FILENAME: &str = "catalog.json";

pub struct ConfcatPaths;

impl ConfcatPaths {
    /// Returns the confcat configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ConfcatError::config("Cannot determine config directory"))
    }

    /// Returns the default path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Returns the default catalog snapshot path.
    pub fn default_catalog_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CATALOG_FILENAME))
    }

    /// Resolves the catalog path: the configured one if set, else the default.
    pub fn catalog_file(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.catalog_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_catalog_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_catalog_path_takes_precedence() {
        let mut config = AppConfig::default();
        config.storage.catalog_path = Some(PathBuf::from("/srv/confcat/catalog.json"));
        assert_eq!(
            ConfcatPaths::catalog_file(&config).unwrap(),
            PathBuf::from("/srv/confcat/catalog.json")
        );
    }

    #[test]
    fn test_default_paths_share_config_dir() {
        // No config dir in some sandboxes; nothing to compare then.
        let Ok(dir) = ConfcatPaths::config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(ConfcatPaths::config_file().unwrap(), dir.join(CONFIG_FILENAME));
        assert_eq!(
            ConfcatPaths::catalog_file(&AppConfig::default()).unwrap(),
            dir.join(CATALOG_FILENAME)
        );
    }
}
