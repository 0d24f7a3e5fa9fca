//! Grocery-list generation across a caller-chosen set of recipes.

use std::sync::Arc;

use crate::domain::grocery::{aggregate, GroceryContribution, GroceryItem};
use crate::domain::ports::{
    CompositionRepository, CompositionStoreError, RecipeRepository, RecipeStoreError,
};
use crate::domain::Error;

/// Domain service deriving aggregated grocery lists.
#[derive(Clone)]
pub struct GroceryService {
    recipes: Arc<dyn RecipeRepository>,
    composition: Arc<dyn CompositionRepository>,
}

impl GroceryService {
    /// Assemble the service from its collaborators.
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        composition: Arc<dyn CompositionRepository>,
    ) -> Self {
        Self {
            recipes,
            composition,
        }
    }

    /// Aggregate the composition of every listed recipe.
    ///
    /// Missing recipe ids contribute nothing; an empty input yields an empty
    /// list. The non-empty requirement is enforced at the HTTP boundary.
    pub async fn generate(&self, recipe_ids: &[i64]) -> Result<Vec<GroceryItem>, Error> {
        let mut contributions = Vec::new();

        for &recipe_id in recipe_ids {
            let Some(recipe) = self
                .recipes
                .find_by_id(recipe_id)
                .await
                .map_err(map_recipe_error)?
            else {
                continue;
            };

            let entries = self
                .composition
                .entries_for_recipe(recipe_id)
                .await
                .map_err(map_composition_error)?;

            contributions.extend(entries.into_iter().map(|entry| GroceryContribution {
                recipe_name: recipe.name.clone(),
                ingredient_id: entry.ingredient.id,
                ingredient_name: entry.ingredient.name,
                quantity: entry.quantity,
                unit: entry.unit,
            }));
        }

        Ok(aggregate(contributions))
    }
}

fn map_recipe_error(err: RecipeStoreError) -> Error {
    Error::internal(err.to_string())
}

fn map_composition_error(err: CompositionStoreError) -> Error {
    Error::internal(err.to_string())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::grocery::GroceryTotal;
    use crate::domain::ports::IngredientRepository;
    use crate::domain::{CompositionDraft, IngredientDraft, Principal, RecipeDraft, RecipeService};
    use crate::outbound::memory::InMemoryCatalogue;

    struct Fixture {
        recipes: RecipeService,
        grocery: GroceryService,
        catalogue: Arc<InMemoryCatalogue>,
    }

    fn fixture() -> Fixture {
        let catalogue = Arc::new(InMemoryCatalogue::new());
        Fixture {
            recipes: RecipeService::new(catalogue.clone(), catalogue.clone(), catalogue.clone()),
            grocery: GroceryService::new(catalogue.clone(), catalogue.clone()),
            catalogue,
        }
    }

    fn cook() -> Principal {
        Principal::new(1, "cook@example.com")
    }

    async fn seed_recipe(fx: &Fixture, name: &str, rows: &[(i64, f64, &str)]) -> i64 {
        let recipe = fx
            .recipes
            .create(&cook(), &RecipeDraft::new(name, None, None).expect("draft"))
            .await
            .expect("recipe");
        for &(ingredient_id, quantity, unit) in rows {
            fx.recipes
                .add_entry(
                    &cook(),
                    recipe.id,
                    &CompositionDraft::new(ingredient_id, quantity, unit, None).expect("draft"),
                )
                .await
                .expect("row");
        }
        recipe.id
    }

    async fn seed_ingredient(fx: &Fixture, name: &str) -> i64 {
        IngredientRepository::insert(
            fx.catalogue.as_ref(),
            &IngredientDraft::new(name, None, None).expect("draft"),
        )
        .await
        .expect("ingredient")
        .id
    }

    #[tokio::test]
    async fn empty_input_yields_empty_list() {
        let fx = fixture();
        let items = fx.grocery.generate(&[]).await.expect("aggregate");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn matching_units_are_summed_across_recipes() {
        let fx = fixture();
        let tomato = seed_ingredient(&fx, "Tomato").await;
        let a = seed_recipe(&fx, "Soup", &[(tomato, 100.0, "grams")]).await;
        let b = seed_recipe(&fx, "Salad", &[(tomato, 50.0, "grams")]).await;

        let items = fx.grocery.generate(&[a, b]).await.expect("aggregate");

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.total, GroceryTotal::Sum(150.0));
        assert_eq!(item.unit, "grams");
        assert_eq!(
            item.recipes,
            vec!["Soup".to_owned(), "Salad".to_owned()]
        );
    }

    #[tokio::test]
    async fn conflicting_units_degrade_to_the_sentinel() {
        let fx = fixture();
        let tomato = seed_ingredient(&fx, "Tomato").await;
        let a = seed_recipe(&fx, "Soup", &[(tomato, 100.0, "grams")]).await;
        let b = seed_recipe(&fx, "Salad", &[(tomato, 1.0, "cup")]).await;

        let items = fx.grocery.generate(&[a, b]).await.expect("aggregate");

        assert_eq!(items[0].total, GroceryTotal::UnitConflict);
        assert_eq!(items[0].total.as_wire_quantity(), -1.0);
        assert_eq!(items[0].unit, "grams");
    }

    #[tokio::test]
    async fn missing_recipe_ids_are_tolerated() {
        let fx = fixture();
        let tomato = seed_ingredient(&fx, "Tomato").await;
        let a = seed_recipe(&fx, "Soup", &[(tomato, 100.0, "grams")]).await;

        let items = fx.grocery.generate(&[a, 999]).await.expect("aggregate");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total, GroceryTotal::Sum(100.0));
    }

    #[tokio::test]
    async fn single_recipe_maps_one_to_one() {
        let fx = fixture();
        let tomato = seed_ingredient(&fx, "Tomato").await;
        let salt = seed_ingredient(&fx, "Salt").await;
        let a = seed_recipe(
            &fx,
            "Soup",
            &[(tomato, 2.0, "pieces"), (salt, 5.0, "grams")],
        )
        .await;

        let items = fx.grocery.generate(&[a]).await.expect("aggregate");

        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item.recipes, vec!["Soup".to_owned()]);
        }
    }
}
