pub mod config_service;
pub mod data_generator;
pub mod dto;
pub mod file_catalog_repository;
pub mod memory_catalog;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::data_generator::{DataGenerator, SeedReport};
pub use crate::file_catalog_repository::{FileBackedCatalog, FileCatalogRepository};
pub use crate::memory_catalog::{CatalogSnapshot, IdCounters, InMemoryCatalog};
pub use crate::paths::ConfcatPaths;
