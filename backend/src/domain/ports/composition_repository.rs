//! Port abstraction for recipe-composition persistence adapters.
use async_trait::async_trait;

use crate::domain::{CompositionDraft, CompositionEntry, CompositionUpdate};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by composition repository adapters.
    pub enum CompositionStoreError {
        /// Repository connection could not be established.
        Connection { message: String } => "composition repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "composition repository query failed: {message}",
        /// The `(recipe, ingredient)` pair already has a row.
        DuplicatePair => "recipe already contains this ingredient",
        /// The referenced ingredient row does not exist.
        IngredientMissing => "ingredient does not exist",
    }
}

/// Capability set for the recipe-ingredient association rows.
#[async_trait]
pub trait CompositionRepository: Send + Sync {
    /// Composition of one recipe, joined with ingredient details.
    async fn entries_for_recipe(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<CompositionEntry>, CompositionStoreError>;

    /// Add one row; the `(recipe, ingredient)` pair must be new.
    async fn insert(
        &self,
        recipe_id: i64,
        draft: &CompositionDraft,
    ) -> Result<CompositionEntry, CompositionStoreError>;

    /// Update one row in place; `None` when the pair has no row.
    async fn update(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        update: &CompositionUpdate,
    ) -> Result<Option<CompositionEntry>, CompositionStoreError>;

    /// Remove one row; `false` when the pair has no row.
    async fn remove(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
    ) -> Result<bool, CompositionStoreError>;

    /// Atomically replace the whole composition of a recipe.
    ///
    /// Delete-then-insert runs inside one transaction: readers never observe
    /// a partially replaced composition and a mid-way failure leaves the
    /// prior rows intact.
    async fn replace_all(
        &self,
        recipe_id: i64,
        drafts: &[CompositionDraft],
    ) -> Result<Vec<CompositionEntry>, CompositionStoreError>;
}
