use std::path::PathBuf;

use anyhow::{Context, Result};

use confcat_core::config::AppConfig;
use confcat_infrastructure::{ConfcatPaths, ConfigService, FileBackedCatalog};

pub mod query;
pub mod seed;
pub mod serve;

pub async fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new().context("Failed to resolve config path")?,
    };
    service
        .get_config()
        .await
        .with_context(|| format!("Failed to load config from {}", service.path().display()))
}

pub async fn open_catalog(config: &AppConfig) -> Result<FileBackedCatalog> {
    let path = ConfcatPaths::catalog_file(config).context("Failed to resolve catalog path")?;
    FileBackedCatalog::open(&path)
        .await
        .with_context(|| format!("Failed to open catalog {}", path.display()))
}
