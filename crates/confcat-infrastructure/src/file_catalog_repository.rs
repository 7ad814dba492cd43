//! File-backed catalog persistence.
//!
//! Stores the whole catalog as one versioned JSON file and uses
//! version-migrate for automatic schema migration.
//!
//! Default file location: `~/.config/confcat/catalog.json`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use version_migrate::Migrator;

use confcat_core::category::{Category, CategoryId, CategoryRepository, Condition, ConditionId};
use confcat_core::error::{ConfcatError, Result};
use confcat_core::query::{PageRequest, PagedResult, SessionFilter, SortSpec};
use confcat_core::session::{Session, SessionIndex, Tag, TagRepository};

use crate::dto::create_catalog_migrator;
use crate::memory_catalog::{CatalogSnapshot, InMemoryCatalog};

const ENTITY: &str = "catalog";

/// Reads and writes catalog snapshots.
pub struct FileCatalogRepository {
    path: PathBuf,
    migrator: Migrator,
}

impl FileCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            migrator: create_catalog_migrator()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot. A missing file is an empty catalog.
    pub async fn load(&self) -> Result<CatalogSnapshot> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(CatalogSnapshot::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfcatError::io(format!("Failed to read catalog: {}", e)))?;

        let json_value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| ConfcatError::data_access(format!("Failed to parse catalog JSON: {}", e)))?;

        self.migrator
            .load_flat_from(ENTITY, json_value)
            .map_err(|e| ConfcatError::migration(format!("Failed to migrate catalog: {}", e)))
    }

    /// Writes the snapshot in the latest schema version.
    pub async fn save(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfcatError::io(format!("Failed to create directory: {}", e)))?;
        }

        let serialized = self
            .migrator
            .save_domain_flat(ENTITY, snapshot.clone())
            .map_err(|e| ConfcatError::data_access(format!("Failed to serialize catalog: {}", e)))?;

        fs::write(&self.path, serialized)
            .await
            .map_err(|e| ConfcatError::io(format!("Failed to write catalog: {}", e)))?;

        tracing::debug!(
            target: "confcat::catalog",
            "Saved catalog to {} ({} sessions, {} categories)",
            self.path.display(),
            snapshot.sessions.len(),
            snapshot.categories.len()
        );
        Ok(())
    }
}

/// In-memory catalog that writes itself back to disk after every category
/// change.
///
/// Reads are served from memory. A mutation and the save that follows it run
/// under one lock, so the file always ends with the latest state.
#[derive(Clone)]
pub struct FileBackedCatalog {
    catalog: InMemoryCatalog,
    file: Arc<FileCatalogRepository>,
    persist: Arc<Mutex<()>>,
}

impl FileBackedCatalog {
    /// Opens the catalog stored at `path`, or an empty one if absent.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = FileCatalogRepository::new(path)?;
        let snapshot = file.load().await?;
        tracing::info!(
            target: "confcat::catalog",
            "Opened catalog {} ({} sessions, {} categories)",
            file.path().display(),
            snapshot.sessions.len(),
            snapshot.categories.len()
        );

        Ok(Self {
            catalog: InMemoryCatalog::from_snapshot(snapshot),
            file: Arc::new(file),
            persist: Arc::new(Mutex::new(())),
        })
    }

    /// The underlying in-memory store. Writes made through it directly are
    /// not persisted until [`FileBackedCatalog::flush`].
    pub fn memory(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Writes the current state to disk.
    pub async fn flush(&self) -> Result<()> {
        let _guard = self.persist.lock().await;
        self.file.save(&self.catalog.snapshot().await).await
    }

    async fn save_locked(&self) -> Result<()> {
        self.file.save(&self.catalog.snapshot().await).await
    }
}

#[async_trait]
impl CategoryRepository for FileBackedCatalog {
    async fn find_by_id_with_conditions(&self, id: CategoryId) -> Result<Option<Category>> {
        self.catalog.find_by_id_with_conditions(id).await
    }

    async fn list_all_with_conditions(&self) -> Result<Vec<Category>> {
        self.catalog.list_all_with_conditions().await
    }

    async fn conditions_for_category(&self, id: CategoryId) -> Result<Vec<Condition>> {
        self.catalog.conditions_for_category(id).await
    }

    async fn create(&self, category: Category) -> Result<Category> {
        let _guard = self.persist.lock().await;
        let created = self.catalog.create(category).await?;
        self.save_locked().await?;
        Ok(created)
    }

    async fn update(&self, category: Category) -> Result<Option<Category>> {
        let _guard = self.persist.lock().await;
        let updated = self.catalog.update(category).await?;
        if updated.is_some() {
            self.save_locked().await?;
        }
        Ok(updated)
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let _guard = self.persist.lock().await;
        let deleted = self.catalog.delete(id).await?;
        if deleted {
            self.save_locked().await?;
        }
        Ok(deleted)
    }

    async fn remove_conditions(
        &self,
        category_id: CategoryId,
        condition_ids: &[ConditionId],
    ) -> Result<()> {
        let _guard = self.persist.lock().await;
        self.catalog
            .remove_conditions(category_id, condition_ids)
            .await?;
        self.save_locked().await
    }
}

#[async_trait]
impl SessionIndex for FileBackedCatalog {
    async fn query(
        &self,
        filter: &SessionFilter,
        sort: &SortSpec,
        page: PageRequest,
    ) -> Result<PagedResult<Session>> {
        self.catalog.query(filter, sort, page).await
    }

    async fn count_all(&self) -> Result<usize> {
        self.catalog.count_all().await
    }
}

#[async_trait]
impl TagRepository for FileBackedCatalog {
    async fn list_all(&self) -> Result<Vec<Tag>> {
        self.catalog.list_all().await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.catalog.find_by_name(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_empty_when_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileCatalogRepository::new(temp_dir.path().join("catalog.json")).unwrap();

        let snapshot = repo.load().await.unwrap();
        assert_eq!(snapshot, CatalogSnapshot::default());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = FileCatalogRepository::new(&path).unwrap();
        assert!(repo.load().await.is_err());
    }

    #[tokio::test]
    async fn test_category_writes_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("catalog.json");

        let catalog = FileBackedCatalog::open(&path).await.unwrap();
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let mut session = Session::new("Intro to AWS", "Online", start, start);
        session.tags.push(Tag::new("aws"));
        catalog.memory().insert_session(session).await.unwrap();
        let created = catalog
            .create(Category::new("Cloud").with_condition(Condition::include_tag("aws")))
            .await
            .unwrap();
        assert!(path.exists());

        let reopened = FileBackedCatalog::open(&path).await.unwrap();
        let loaded = reopened
            .find_by_id_with_conditions(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.name, "Cloud");
        assert_eq!(loaded.conditions[0].value, "aws");

        let page = reopened
            .query(&SessionFilter::all(), &SortSpec::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].tag_names().collect::<Vec<_>>(), vec!["aws"]);

        let next = reopened.create(Category::new("Second")).await.unwrap();
        assert_eq!(next.id, created.id + 1);
    }
}
