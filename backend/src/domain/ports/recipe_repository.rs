//! Port abstraction for recipe persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Recipe, RecipeDraft};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Capability set the catalogue service needs from recipe storage.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// List every recipe.
    async fn list(&self) -> Result<Vec<Recipe>, RecipeStoreError>;

    /// Fetch one recipe by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, RecipeStoreError>;

    /// Fetch only the owner column for the ownership gate.
    ///
    /// Cheaper than a full row fetch and sufficient to order the
    /// missing-then-forbidden decision.
    async fn find_owner(&self, id: i64) -> Result<Option<i64>, RecipeStoreError>;

    /// List recipes assigned to a category.
    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Recipe>, RecipeStoreError>;

    /// List recipes whose composition references the ingredient.
    async fn list_using_ingredient(
        &self,
        ingredient_id: i64,
    ) -> Result<Vec<Recipe>, RecipeStoreError>;

    /// List recipes whose composition references **every** listed ingredient.
    async fn list_containing_all(
        &self,
        ingredient_ids: &[i64],
    ) -> Result<Vec<Recipe>, RecipeStoreError>;

    /// Insert a recipe owned by `owner_user_id` from a validated draft.
    async fn insert(&self, owner_user_id: i64, draft: &RecipeDraft)
        -> Result<Recipe, RecipeStoreError>;

    /// Update an existing recipe in place; `None` when the row is absent.
    async fn update(&self, id: i64, draft: &RecipeDraft)
        -> Result<Option<Recipe>, RecipeStoreError>;

    /// Delete a recipe; composition rows cascade. `false` when absent.
    async fn delete(&self, id: i64) -> Result<bool, RecipeStoreError>;
}
