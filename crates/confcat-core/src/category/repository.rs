//! Category repository trait.
//!
//! Defines the interface for category and condition persistence.

use super::model::{Category, CategoryId, Condition, ConditionId};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for categories and their ordered conditions.
///
/// The store owns id assignment, audit timestamps and the invariant that a
/// category's conditions carry that category's id.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Finds a category by id, including its ordered conditions.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Category))`: Category found
    /// - `Ok(None)`: No category with that id (never an error)
    /// - `Err(_)`: The store could not be read
    async fn find_by_id_with_conditions(&self, id: CategoryId) -> Result<Option<Category>>;

    /// Lists every category with conditions, newest first.
    async fn list_all_with_conditions(&self) -> Result<Vec<Category>>;

    /// Returns the ordered conditions of a category (empty if unknown).
    async fn conditions_for_category(&self, id: CategoryId) -> Result<Vec<Condition>>;

    /// Stores a new category, assigning ids and `created_at` to it and to
    /// each of its conditions.
    async fn create(&self, category: Category) -> Result<Category>;

    /// Replaces name, description and conditions of an existing category.
    ///
    /// Conditions missing from `category` are removed, unsaved or unknown
    /// ones are added and matching ids are updated in place.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Category))`: The stored state after the update
    /// - `Ok(None)`: No category with that id
    async fn update(&self, category: Category) -> Result<Option<Category>>;

    /// Deletes a category and its conditions. Returns false if absent.
    async fn delete(&self, id: CategoryId) -> Result<bool>;

    /// Removes the listed conditions from a category. Unknown ids are ignored.
    async fn remove_conditions(
        &self,
        category_id: CategoryId,
        condition_ids: &[ConditionId],
    ) -> Result<()>;
}
