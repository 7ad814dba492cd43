use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfcatError, Result};
use crate::query::DEFAULT_PAGE_SIZE;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Rejects settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs == 0 {
            return Err(ConfcatError::config(
                "server.request_timeout_secs must be at least 1",
            ));
        }
        self.paging.validate()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Upper bound for a single engine call made on behalf of a request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PagingConfig {
    /// `default_page_size` must lie in `1..=max_page_size`.
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(ConfcatError::config(
                "paging.default_page_size must be at least 1",
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfcatError::config(format!(
                "paging.default_page_size ({}) exceeds paging.max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Catalog snapshot file. `None` means the platform default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SeedConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_session_count")]
    pub session_count: usize,
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            session_count: default_session_count(),
            rng_seed: default_rng_seed(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    100
}

fn default_session_count() -> usize {
    1000
}

fn default_rng_seed() -> u64 {
    42
}
