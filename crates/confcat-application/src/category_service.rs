//! Category management.
//!
//! Validates caller input before it reaches the category store and maps
//! store results to DTOs.

use std::sync::Arc;

use confcat_core::category::{Category, CategoryId, CategoryRepository, ConditionId, ConditionType};
use confcat_core::error::{ConfcatError, Result};

use crate::dto::{CategoryDto, ConditionDto};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// All categories with their conditions, newest first.
    pub async fn list_categories(&self) -> Result<Vec<CategoryDto>> {
        let categories = self.categories.list_all_with_conditions().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Option<CategoryDto>> {
        let category = self.categories.find_by_id_with_conditions(id).await?;
        Ok(category.map(CategoryDto::from))
    }

    pub async fn create_category(&self, dto: CategoryDto) -> Result<CategoryDto> {
        validate(&dto)?;
        let mut category = dto.into_domain();
        category.id = 0;
        for condition in &mut category.conditions {
            condition.id = 0;
        }

        let created = self.categories.create(category).await?;
        tracing::info!(
            target: "confcat::catalog",
            category_id = created.id,
            conditions = created.conditions.len(),
            "Created category {:?}",
            created.name
        );
        Ok(created.into())
    }

    /// Replaces a category. `id` must match the id in `dto`.
    pub async fn update_category(&self, id: CategoryId, dto: CategoryDto) -> Result<CategoryDto> {
        if dto.id != id {
            return Err(ConfcatError::invalid_input(format!(
                "Category id {} in the path does not match id {} in the body",
                id, dto.id
            )));
        }
        validate(&dto)?;

        let updated = self
            .categories
            .update(dto.into_domain())
            .await?
            .ok_or_else(|| ConfcatError::not_found("category", id))?;
        tracing::info!(
            target: "confcat::catalog",
            category_id = id,
            conditions = updated.conditions.len(),
            "Updated category"
        );
        Ok(updated.into())
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<()> {
        if !self.categories.delete(id).await? {
            return Err(ConfcatError::not_found("category", id));
        }
        tracing::info!(target: "confcat::catalog", category_id = id, "Deleted category");
        Ok(())
    }

    /// Drops the listed conditions. An unknown category is a no-op.
    pub async fn remove_conditions(
        &self,
        category_id: CategoryId,
        condition_ids: &[ConditionId],
    ) -> Result<()> {
        self.categories
            .remove_conditions(category_id, condition_ids)
            .await
    }

    pub async fn conditions_for_category(&self, category_id: CategoryId) -> Result<Vec<ConditionDto>> {
        let conditions = self.categories.conditions_for_category(category_id).await?;
        Ok(conditions.iter().map(ConditionDto::from).collect())
    }
}

fn validate(dto: &CategoryDto) -> Result<()> {
    let name = dto.name.trim();
    if name.is_empty() {
        return Err(ConfcatError::invalid_input("Category name is required"));
    }
    if name.chars().count() > Category::MAX_NAME_LEN {
        return Err(ConfcatError::invalid_input(format!(
            "Category name exceeds {} characters",
            Category::MAX_NAME_LEN
        )));
    }
    if let Some(description) = &dto.description {
        if description.chars().count() > Category::MAX_DESCRIPTION_LEN {
            return Err(ConfcatError::invalid_input(format!(
                "Category description exceeds {} characters",
                Category::MAX_DESCRIPTION_LEN
            )));
        }
    }

    for condition in &dto.conditions {
        if condition.condition_type == ConditionType::Unrecognized {
            return Err(ConfcatError::invalid_input("Unknown condition type"));
        }
        if condition.value.chars().count() > Category::MAX_CONDITION_VALUE_LEN {
            return Err(ConfcatError::invalid_input(format!(
                "Condition value exceeds {} characters",
                Category::MAX_CONDITION_VALUE_LEN
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confcat_infrastructure::InMemoryCatalog;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryCatalog::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service
            .create_category(
                CategoryDto::new("  Cloud  ")
                    .with_condition(ConditionType::IncludeTag, "aws")
                    .with_condition(ConditionType::Location, "Online"),
            )
            .await
            .unwrap();

        assert_eq!(created.name, "Cloud");
        assert!(created.created_at.is_some());
        assert!(created.conditions.iter().all(|c| c.category_id == created.id));

        let fetched = service.get_category(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(service.get_category(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_input() {
        let service = service();

        let blank = service.create_category(CategoryDto::new("   ")).await;
        assert!(blank.unwrap_err().is_invalid_input());

        let long_name = service.create_category(CategoryDto::new("x".repeat(101))).await;
        assert!(long_name.unwrap_err().is_invalid_input());

        let mut long_description = CategoryDto::new("Ok");
        long_description.description = Some("d".repeat(501));
        let err = service.create_category(long_description).await.unwrap_err();
        assert!(err.is_invalid_input());

        let long_value = CategoryDto::new("Ok").with_condition(ConditionType::IncludeTag, "v".repeat(501));
        let err = service.create_category(long_value).await.unwrap_err();
        assert!(err.is_invalid_input());

        let unknown = CategoryDto::new("Ok").with_condition(ConditionType::Unrecognized, "x");
        let err = service.create_category(unknown).await.unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_update_checks_ids() {
        let service = service();
        let created = service
            .create_category(CategoryDto::new("Cloud").with_condition(ConditionType::IncludeTag, "aws"))
            .await
            .unwrap();

        let mismatch = service.update_category(created.id + 1, created.clone()).await;
        assert!(mismatch.unwrap_err().is_invalid_input());

        let mut ghost = created.clone();
        ghost.id = 999;
        let missing = service.update_category(999, ghost).await;
        assert!(missing.unwrap_err().is_not_found());

        let mut edited = created.clone();
        edited.conditions[0].value = "gcp".to_string();
        edited
            .conditions
            .push(ConditionDto::new(ConditionType::ExcludeTag, "beginner"));
        let updated = service.update_category(created.id, edited).await.unwrap();
        assert_eq!(updated.conditions.len(), 2);
        assert_eq!(updated.conditions[0].id, created.conditions[0].id);
        assert_eq!(updated.conditions[0].value, "gcp");
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_and_condition_maintenance() {
        let service = service();
        let created = service
            .create_category(
                CategoryDto::new("Cloud")
                    .with_condition(ConditionType::IncludeTag, "aws")
                    .with_condition(ConditionType::ExcludeTag, "beginner"),
            )
            .await
            .unwrap();

        service
            .remove_conditions(created.id, &[created.conditions[1].id])
            .await
            .unwrap();
        let remaining = service.conditions_for_category(created.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].condition_type, ConditionType::IncludeTag);

        service.remove_conditions(12345, &[1]).await.unwrap();

        service.delete_category(created.id).await.unwrap();
        let err = service.delete_category(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let service = service();
        service.create_category(CategoryDto::new("First")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service.create_category(CategoryDto::new("Second")).await.unwrap();

        let names: Vec<_> = service
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
