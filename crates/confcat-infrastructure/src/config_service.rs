//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml`, either at an explicit path or at
//! the platform default (`~/.config/confcat/config.toml`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;

use confcat_core::config::AppConfig;
use confcat_core::error::{ConfcatError, Result};

use crate::paths::ConfcatPaths;

/// Loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first successful load.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ConfcatPaths::config_file()?))
    }

    /// Creates a service reading `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it from disk if not cached.
    ///
    /// A missing file yields defaults. An unreadable or malformed file is a
    /// `Config` error.
    pub async fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self.config.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = Self::load(&self.path).await?;
        *self.config.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub async fn invalidate_cache(&self) {
        *self.config.write().await = None;
    }

    async fn load(path: &Path) -> Result<AppConfig> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!(
                target: "confcat::catalog",
                "No config file at {}, using defaults",
                path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            ConfcatError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            ConfcatError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
