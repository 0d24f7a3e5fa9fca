//! Ingredient catalogue use-cases.
//!
//! Ingredients form a shared catalogue: any authenticated principal may
//! curate them, so there is no ownership gate here, only referential
//! protection against deleting rows that recipes still use.

use std::sync::Arc;

use crate::domain::ports::{
    IngredientRepository, IngredientStoreError, RecipeRepository, RecipeStoreError,
};
use crate::domain::{Error, Ingredient, IngredientDraft, IngredientFilter, Recipe};

/// Domain service for the shared ingredient catalogue.
#[derive(Clone)]
pub struct IngredientService {
    ingredients: Arc<dyn IngredientRepository>,
    recipes: Arc<dyn RecipeRepository>,
}

impl IngredientService {
    /// Assemble the service from its collaborators.
    pub fn new(
        ingredients: Arc<dyn IngredientRepository>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            ingredients,
            recipes,
        }
    }

    /// List ingredients through the public search filter.
    pub async fn list(&self, filter: &IngredientFilter) -> Result<Vec<Ingredient>, Error> {
        self.ingredients.list(filter).await.map_err(map_store_error)
    }

    /// Fetch one ingredient.
    pub async fn get(&self, id: i64) -> Result<Ingredient, Error> {
        self.ingredients
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(ingredient_not_found)
    }

    /// List the recipes whose composition uses an existing ingredient.
    pub async fn recipes_using(&self, id: i64) -> Result<Vec<Recipe>, Error> {
        self.get(id).await?;
        self.recipes
            .list_using_ingredient(id)
            .await
            .map_err(map_recipe_error)
    }

    /// Create a new catalogue ingredient.
    pub async fn create(&self, draft: &IngredientDraft) -> Result<Ingredient, Error> {
        self.ingredients
            .insert(draft)
            .await
            .map_err(map_store_error)
    }

    /// Update an existing ingredient in place.
    pub async fn update(&self, id: i64, draft: &IngredientDraft) -> Result<Ingredient, Error> {
        self.ingredients
            .update(id, draft)
            .await
            .map_err(map_store_error)?
            .ok_or_else(ingredient_not_found)
    }

    /// Delete an ingredient no recipe references any more.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let deleted = self.ingredients.delete(id).await.map_err(map_store_error)?;
        if deleted {
            Ok(())
        } else {
            Err(ingredient_not_found())
        }
    }
}

fn ingredient_not_found() -> Error {
    Error::not_found("ingredient not found")
}

fn map_store_error(err: IngredientStoreError) -> Error {
    match err {
        IngredientStoreError::DuplicateName => Error::conflict("ingredient already exists"),
        IngredientStoreError::StillReferenced => {
            Error::conflict("cannot delete ingredient that is used by recipes")
        }
        other => Error::internal(other.to_string()),
    }
}

fn map_recipe_error(err: RecipeStoreError) -> Error {
    Error::internal(err.to_string())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{CompositionRepository, RecipeRepository};
    use crate::domain::{CompositionDraft, ErrorKind, RecipeDraft};
    use crate::outbound::memory::InMemoryCatalogue;
    use rstest::rstest;

    fn service(catalogue: &Arc<InMemoryCatalogue>) -> IngredientService {
        IngredientService::new(catalogue.clone(), catalogue.clone())
    }

    fn draft(name: &str) -> IngredientDraft {
        IngredientDraft::new(name, None, None).expect("valid draft")
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let catalogue = Arc::new(InMemoryCatalogue::new());
        let ingredients = service(&catalogue);

        ingredients.create(&draft("Flour")).await.expect("first");
        let err = ingredients
            .create(&draft("Flour"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.message().contains("already exists"));
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let catalogue = Arc::new(InMemoryCatalogue::new());
        let ingredients = service(&catalogue);

        let err = ingredients
            .update(42, &draft("Flour"))
            .await
            .expect_err("missing row");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_refused_while_referenced() {
        let catalogue = Arc::new(InMemoryCatalogue::new());
        let ingredients = service(&catalogue);

        let flour = ingredients.create(&draft("Flour")).await.expect("create");
        let recipe = RecipeRepository::insert(
            catalogue.as_ref(),
            1,
            &RecipeDraft::new("Bread", None, None).expect("draft"),
        )
        .await
        .expect("recipe");
        CompositionRepository::insert(
            catalogue.as_ref(),
            recipe.id,
            &CompositionDraft::new(flour.id, 500.0, "grams", None).expect("draft"),
        )
        .await
        .expect("row");

        let err = ingredients.delete(flour.id).await.expect_err("in use");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.message().contains("cannot delete"));
    }

    #[rstest]
    #[case(IngredientFilter::NameContains("flo".into()), 1)]
    #[case(IngredientFilter::CategoryEquals("spice".into()), 1)]
    #[case(IngredientFilter::All, 2)]
    #[tokio::test]
    async fn list_applies_filter(#[case] filter: IngredientFilter, #[case] expected: usize) {
        let catalogue = Arc::new(InMemoryCatalogue::new());
        let ingredients = service(&catalogue);

        ingredients.create(&draft("Flour")).await.expect("flour");
        ingredients
            .create(&IngredientDraft::new("Pepper", None, Some("spice".into())).expect("draft"))
            .await
            .expect("pepper");

        let listed = ingredients.list(&filter).await.expect("list");
        assert_eq!(listed.len(), expected);
    }

    #[tokio::test]
    async fn recipes_using_requires_existing_ingredient() {
        let catalogue = Arc::new(InMemoryCatalogue::new());
        let ingredients = service(&catalogue);

        let err = ingredients.recipes_using(5).await.expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
