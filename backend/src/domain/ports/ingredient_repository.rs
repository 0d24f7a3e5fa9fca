//! Port abstraction for ingredient persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientDraft, IngredientFilter};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ingredient repository adapters.
    pub enum IngredientStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ingredient repository query failed: {message}",
        /// The ingredient name is already taken (unique index on `name`).
        DuplicateName => "ingredient name already exists",
        /// Deletion refused: composition rows still reference the row.
        StillReferenced => "ingredient is referenced by recipes",
    }
}

/// Capability set for the shared ingredient catalogue.
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// List ingredients, optionally narrowed by the public search filter.
    async fn list(&self, filter: &IngredientFilter) -> Result<Vec<Ingredient>, IngredientStoreError>;

    /// Fetch one ingredient by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, IngredientStoreError>;

    /// Insert a new ingredient from a validated draft.
    async fn insert(&self, draft: &IngredientDraft) -> Result<Ingredient, IngredientStoreError>;

    /// Update an existing ingredient in place; `None` when the row is absent.
    async fn update(
        &self,
        id: i64,
        draft: &IngredientDraft,
    ) -> Result<Option<Ingredient>, IngredientStoreError>;

    /// Delete an ingredient; `false` when the row is absent. Refused with
    /// [`IngredientStoreError::StillReferenced`] while composition rows
    /// point at it.
    async fn delete(&self, id: i64) -> Result<bool, IngredientStoreError>;
}
