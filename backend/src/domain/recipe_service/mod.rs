//! Recipe catalogue use-cases: CRUD, composition curation, and the
//! ownership gate that protects every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::ports::{
    CategoryRepository, CategoryStoreError, CompositionRepository, CompositionStoreError,
    RecipeRepository, RecipeStoreError,
};
use crate::domain::{
    Category, CompositionDraft, CompositionEntry, CompositionUpdate, Error, Principal, Recipe,
    RecipeDraft,
};

/// A recipe with its composition attached when the caller asked to pay for
/// the join.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    /// The recipe row.
    pub recipe: Recipe,
    /// Composition rows, present only when requested.
    pub composition: Option<Vec<CompositionEntry>>,
}

/// Domain service for recipes and their composition.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    categories: Arc<dyn CategoryRepository>,
    composition: Arc<dyn CompositionRepository>,
}

impl RecipeService {
    /// Assemble the service from its collaborators.
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        categories: Arc<dyn CategoryRepository>,
        composition: Arc<dyn CompositionRepository>,
    ) -> Self {
        Self {
            recipes,
            categories,
            composition,
        }
    }

    /// List every recipe, optionally with composition.
    pub async fn list(&self, include_composition: bool) -> Result<Vec<RecipeView>, Error> {
        let recipes = self.recipes.list().await.map_err(map_recipe_error)?;
        self.attach_composition(recipes, include_composition).await
    }

    /// Fetch one recipe, optionally with composition.
    pub async fn get(&self, id: i64, include_composition: bool) -> Result<RecipeView, Error> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(recipe_not_found)?;
        let mut views = self
            .attach_composition(vec![recipe], include_composition)
            .await?;
        views.pop().ok_or_else(recipe_not_found)
    }

    /// List every category.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.categories.list().await.map_err(map_category_error)
    }

    /// List recipes assigned to an existing category.
    pub async fn by_category(&self, category_id: i64) -> Result<Vec<Recipe>, Error> {
        self.categories
            .find_by_id(category_id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found("category not found"))?;
        self.recipes
            .list_by_category(category_id)
            .await
            .map_err(map_recipe_error)
    }

    /// List recipes whose composition contains **every** listed ingredient.
    ///
    /// The id list is validated at the HTTP boundary; an empty list never
    /// reaches this method.
    pub async fn containing_all(
        &self,
        ingredient_ids: &[i64],
        include_composition: bool,
    ) -> Result<Vec<RecipeView>, Error> {
        let recipes = self
            .recipes
            .list_containing_all(ingredient_ids)
            .await
            .map_err(map_recipe_error)?;
        self.attach_composition(recipes, include_composition).await
    }

    /// Create a recipe owned by the caller.
    pub async fn create(&self, principal: &Principal, draft: &RecipeDraft) -> Result<Recipe, Error> {
        self.ensure_category_exists(draft).await?;
        self.recipes
            .insert(principal.user_id(), draft)
            .await
            .map_err(map_recipe_error)
    }

    /// Update a recipe the caller owns.
    pub async fn update(
        &self,
        principal: &Principal,
        id: i64,
        draft: &RecipeDraft,
    ) -> Result<Recipe, Error> {
        self.authorize_owner(id, principal).await?;
        self.ensure_category_exists(draft).await?;
        self.recipes
            .update(id, draft)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(recipe_not_found)
    }

    /// Delete a recipe the caller owns; composition rows cascade.
    pub async fn delete(&self, principal: &Principal, id: i64) -> Result<(), Error> {
        self.authorize_owner(id, principal).await?;
        let deleted = self.recipes.delete(id).await.map_err(map_recipe_error)?;
        if deleted {
            Ok(())
        } else {
            Err(recipe_not_found())
        }
    }

    /// Composition of a recipe, joined with ingredient details.
    pub async fn composition(&self, recipe_id: i64) -> Result<Vec<CompositionEntry>, Error> {
        self.recipes
            .find_by_id(recipe_id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(recipe_not_found)?;
        self.composition
            .entries_for_recipe(recipe_id)
            .await
            .map_err(map_composition_error)
    }

    /// Add one composition row to a recipe the caller owns.
    pub async fn add_entry(
        &self,
        principal: &Principal,
        recipe_id: i64,
        draft: &CompositionDraft,
    ) -> Result<CompositionEntry, Error> {
        self.authorize_owner(recipe_id, principal).await?;
        self.composition
            .insert(recipe_id, draft)
            .await
            .map_err(map_composition_error)
    }

    /// Update one composition row of a recipe the caller owns.
    pub async fn update_entry(
        &self,
        principal: &Principal,
        recipe_id: i64,
        ingredient_id: i64,
        update: &CompositionUpdate,
    ) -> Result<CompositionEntry, Error> {
        self.authorize_owner(recipe_id, principal).await?;
        self.composition
            .update(recipe_id, ingredient_id, update)
            .await
            .map_err(map_composition_error)?
            .ok_or_else(entry_not_found)
    }

    /// Remove one composition row from a recipe the caller owns.
    pub async fn remove_entry(
        &self,
        principal: &Principal,
        recipe_id: i64,
        ingredient_id: i64,
    ) -> Result<(), Error> {
        self.authorize_owner(recipe_id, principal).await?;
        let removed = self
            .composition
            .remove(recipe_id, ingredient_id)
            .await
            .map_err(map_composition_error)?;
        if removed {
            Ok(())
        } else {
            Err(entry_not_found())
        }
    }

    /// Replace the whole composition of a recipe the caller owns.
    ///
    /// Every supplied row is validated before any write; the storage adapter
    /// runs delete-then-insert in one transaction.
    pub async fn set_composition(
        &self,
        principal: &Principal,
        recipe_id: i64,
        drafts: &[CompositionDraft],
    ) -> Result<Vec<CompositionEntry>, Error> {
        self.authorize_owner(recipe_id, principal).await?;

        let mut seen = HashSet::new();
        for draft in drafts {
            if !seen.insert(draft.ingredient_id()) {
                return Err(Error::conflict(
                    "composition lists the same ingredient twice",
                ));
            }
        }

        self.composition
            .replace_all(recipe_id, drafts)
            .await
            .map_err(map_composition_error)
    }

    /// The ownership gate: one lightweight owner-only query.
    ///
    /// Missing rows report 404 before ownership is considered; rows owned by
    /// another principal report 403 without hiding existence.
    async fn authorize_owner(&self, recipe_id: i64, principal: &Principal) -> Result<(), Error> {
        match self
            .recipes
            .find_owner(recipe_id)
            .await
            .map_err(map_recipe_error)?
        {
            None => Err(recipe_not_found()),
            Some(owner) if owner != principal.user_id() => Err(Error::forbidden(
                "only the recipe owner may modify this recipe",
            )),
            Some(_) => Ok(()),
        }
    }

    async fn ensure_category_exists(&self, draft: &RecipeDraft) -> Result<(), Error> {
        if let Some(category_id) = draft.category_id() {
            self.categories
                .find_by_id(category_id)
                .await
                .map_err(map_category_error)?
                .ok_or_else(|| Error::not_found("category not found"))?;
        }
        Ok(())
    }

    async fn attach_composition(
        &self,
        recipes: Vec<Recipe>,
        include_composition: bool,
    ) -> Result<Vec<RecipeView>, Error> {
        let mut views = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let composition = if include_composition {
                Some(
                    self.composition
                        .entries_for_recipe(recipe.id)
                        .await
                        .map_err(map_composition_error)?,
                )
            } else {
                None
            };
            views.push(RecipeView {
                recipe,
                composition,
            });
        }
        Ok(views)
    }
}

fn recipe_not_found() -> Error {
    Error::not_found("recipe not found")
}

fn entry_not_found() -> Error {
    Error::not_found("recipe does not contain this ingredient")
}

fn map_recipe_error(err: RecipeStoreError) -> Error {
    Error::internal(err.to_string())
}

fn map_category_error(err: CategoryStoreError) -> Error {
    Error::internal(err.to_string())
}

fn map_composition_error(err: CompositionStoreError) -> Error {
    match err {
        CompositionStoreError::DuplicatePair => {
            Error::conflict("recipe already contains this ingredient")
        }
        CompositionStoreError::IngredientMissing => Error::not_found("ingredient not found"),
        other => Error::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests;
