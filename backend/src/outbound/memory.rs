//! In-memory port adapters.
//!
//! These honour the same contracts as the Diesel adapters (uniqueness
//! conflicts, referential refusal, cascade on recipe deletion, atomic
//! composition replacement) so services and handlers can be exercised
//! without PostgreSQL. They are also the substitutes the test suites inject.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CategoryRepository, CategoryStoreError, CompositionRepository, CompositionStoreError,
    IngredientRepository, IngredientStoreError, PasswordHashError, PasswordHasher,
    RecipeRepository, RecipeStoreError, UserRepository, UserStoreError,
};
use crate::domain::{
    Category, CompositionDraft, CompositionEntry, CompositionUpdate, Ingredient, IngredientDraft,
    IngredientFilter, Recipe, RecipeDraft, User,
};

/// In-memory implementation of [`UserRepository`].
#[derive(Default)]
pub struct InMemoryUsers {
    state: Mutex<UsersState>,
}

#[derive(Default)]
struct UsersState {
    rows: Vec<User>,
    next_id: i64,
}

impl InMemoryUsers {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, UserStoreError> {
        let mut state = self.state.lock().expect("users state lock");
        if state.rows.iter().any(|user| user.email == email) {
            return Err(UserStoreError::duplicate_email());
        }
        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.next_id,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: now,
            updated_at: now,
        };
        state.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let state = self.state.lock().expect("users state lock");
        Ok(state.rows.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let state = self.state.lock().expect("users state lock");
        Ok(state.rows.iter().find(|user| user.id == id).cloned())
    }
}

/// Internal composition row without the ingredient join.
#[derive(Debug, Clone)]
struct CompositionRow {
    recipe_id: i64,
    ingredient_id: i64,
    quantity: f64,
    unit: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct CatalogueState {
    categories: Vec<Category>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    rows: Vec<CompositionRow>,
    next_category_id: i64,
    next_ingredient_id: i64,
    next_recipe_id: i64,
}

/// In-memory implementation of the whole catalogue side: recipes,
/// categories, ingredients, and composition rows behind one lock.
#[derive(Default)]
pub struct InMemoryCatalogue {
    state: Mutex<CatalogueState>,
}

impl InMemoryCatalogue {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a category row. Categories have no write endpoints; production
    /// rows arrive via migrations or operator tooling.
    pub fn seed_category(&self, name: &str, description: Option<&str>) -> Category {
        let mut state = self.state.lock().expect("catalogue state lock");
        state.next_category_id += 1;
        let category = Category {
            id: state.next_category_id,
            name: name.to_owned(),
            description: description.map(str::to_owned),
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        category
    }
}

fn join_entry(row: &CompositionRow, ingredient: Ingredient) -> CompositionEntry {
    CompositionEntry {
        recipe_id: row.recipe_id,
        ingredient,
        quantity: row.quantity,
        unit: row.unit.clone(),
        notes: row.notes.clone(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

impl CatalogueState {
    fn ingredient(&self, id: i64) -> Option<Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.id == id)
            .cloned()
    }

    fn entries_for(&self, recipe_id: i64) -> Vec<CompositionEntry> {
        self.rows
            .iter()
            .filter(|row| row.recipe_id == recipe_id)
            .filter_map(|row| self.ingredient(row.ingredient_id).map(|i| join_entry(row, i)))
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogue {
    async fn list(&self) -> Result<Vec<Category>, CategoryStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state.categories.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, CategoryStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }
}

#[async_trait]
impl IngredientRepository for InMemoryCatalogue {
    async fn list(
        &self,
        filter: &IngredientFilter,
    ) -> Result<Vec<Ingredient>, IngredientStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        let matches = |ingredient: &&Ingredient| match filter {
            IngredientFilter::All => true,
            IngredientFilter::NameContains(term) => ingredient
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            IngredientFilter::CategoryEquals(label) => {
                ingredient.category.as_deref() == Some(label.as_str())
            }
        };
        Ok(state.ingredients.iter().filter(matches).cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, IngredientStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state.ingredient(id))
    }

    async fn insert(&self, draft: &IngredientDraft) -> Result<Ingredient, IngredientStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        if state
            .ingredients
            .iter()
            .any(|ingredient| ingredient.name == draft.name())
        {
            return Err(IngredientStoreError::duplicate_name());
        }
        state.next_ingredient_id += 1;
        let now = Utc::now();
        let ingredient = Ingredient {
            id: state.next_ingredient_id,
            name: draft.name().to_owned(),
            description: draft.description().map(str::to_owned),
            category: draft.category().map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        state.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn update(
        &self,
        id: i64,
        draft: &IngredientDraft,
    ) -> Result<Option<Ingredient>, IngredientStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        if state
            .ingredients
            .iter()
            .any(|ingredient| ingredient.id != id && ingredient.name == draft.name())
        {
            return Err(IngredientStoreError::duplicate_name());
        }
        let Some(ingredient) = state
            .ingredients
            .iter_mut()
            .find(|ingredient| ingredient.id == id)
        else {
            return Ok(None);
        };
        ingredient.name = draft.name().to_owned();
        ingredient.description = draft.description().map(str::to_owned);
        ingredient.category = draft.category().map(str::to_owned);
        ingredient.updated_at = Utc::now();
        Ok(Some(ingredient.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, IngredientStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        if !state.ingredients.iter().any(|ingredient| ingredient.id == id) {
            return Ok(false);
        }
        if state.rows.iter().any(|row| row.ingredient_id == id) {
            return Err(IngredientStoreError::still_referenced());
        }
        state.ingredients.retain(|ingredient| ingredient.id != id);
        Ok(true)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryCatalogue {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state.recipes.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, RecipeStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state.recipes.iter().find(|recipe| recipe.id == id).cloned())
    }

    async fn find_owner(&self, id: i64) -> Result<Option<i64>, RecipeStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state
            .recipes
            .iter()
            .find(|recipe| recipe.id == id)
            .map(|recipe| recipe.owner_user_id))
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Recipe>, RecipeStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| recipe.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn list_using_ingredient(
        &self,
        ingredient_id: i64,
    ) -> Result<Vec<Recipe>, RecipeStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        let recipe_ids: HashSet<i64> = state
            .rows
            .iter()
            .filter(|row| row.ingredient_id == ingredient_id)
            .map(|row| row.recipe_id)
            .collect();
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| recipe_ids.contains(&recipe.id))
            .cloned()
            .collect())
    }

    async fn list_containing_all(
        &self,
        ingredient_ids: &[i64],
    ) -> Result<Vec<Recipe>, RecipeStoreError> {
        let wanted: HashSet<i64> = ingredient_ids.iter().copied().collect();
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| {
                let present: HashSet<i64> = state
                    .rows
                    .iter()
                    .filter(|row| row.recipe_id == recipe.id)
                    .map(|row| row.ingredient_id)
                    .collect();
                wanted.is_subset(&present)
            })
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        owner_user_id: i64,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        state.next_recipe_id += 1;
        let now = Utc::now();
        let recipe = Recipe {
            id: state.next_recipe_id,
            name: draft.name().to_owned(),
            description: draft.description().map(str::to_owned),
            category_id: draft.category_id(),
            owner_user_id,
            created_at: now,
            updated_at: now,
        };
        state.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(
        &self,
        id: i64,
        draft: &RecipeDraft,
    ) -> Result<Option<Recipe>, RecipeStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        let Some(recipe) = state.recipes.iter_mut().find(|recipe| recipe.id == id) else {
            return Ok(None);
        };
        recipe.name = draft.name().to_owned();
        recipe.description = draft.description().map(str::to_owned);
        recipe.category_id = draft.category_id();
        recipe.updated_at = Utc::now();
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RecipeStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        if !state.recipes.iter().any(|recipe| recipe.id == id) {
            return Ok(false);
        }
        state.recipes.retain(|recipe| recipe.id != id);
        // Composition rows cascade with their recipe.
        state.rows.retain(|row| row.recipe_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CompositionRepository for InMemoryCatalogue {
    async fn entries_for_recipe(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<CompositionEntry>, CompositionStoreError> {
        let state = self.state.lock().expect("catalogue state lock");
        Ok(state.entries_for(recipe_id))
    }

    async fn insert(
        &self,
        recipe_id: i64,
        draft: &CompositionDraft,
    ) -> Result<CompositionEntry, CompositionStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        let Some(ingredient) = state.ingredient(draft.ingredient_id()) else {
            return Err(CompositionStoreError::ingredient_missing());
        };
        if state
            .rows
            .iter()
            .any(|row| row.recipe_id == recipe_id && row.ingredient_id == draft.ingredient_id())
        {
            return Err(CompositionStoreError::duplicate_pair());
        }
        let now = Utc::now();
        let row = CompositionRow {
            recipe_id,
            ingredient_id: draft.ingredient_id(),
            quantity: draft.quantity(),
            unit: draft.unit().to_owned(),
            notes: draft.notes().map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        let entry = join_entry(&row, ingredient);
        state.rows.push(row);
        Ok(entry)
    }

    async fn update(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        update: &CompositionUpdate,
    ) -> Result<Option<CompositionEntry>, CompositionStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        let Some(ingredient) = state.ingredient(ingredient_id) else {
            return Ok(None);
        };
        let Some(row) = state
            .rows
            .iter_mut()
            .find(|row| row.recipe_id == recipe_id && row.ingredient_id == ingredient_id)
        else {
            return Ok(None);
        };
        row.quantity = update.quantity();
        row.unit = update.unit().to_owned();
        row.notes = update.notes().map(str::to_owned);
        row.updated_at = Utc::now();
        let entry = join_entry(row, ingredient);
        Ok(Some(entry))
    }

    async fn remove(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
    ) -> Result<bool, CompositionStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");
        let before = state.rows.len();
        state
            .rows
            .retain(|row| !(row.recipe_id == recipe_id && row.ingredient_id == ingredient_id));
        Ok(state.rows.len() != before)
    }

    async fn replace_all(
        &self,
        recipe_id: i64,
        drafts: &[CompositionDraft],
    ) -> Result<Vec<CompositionEntry>, CompositionStoreError> {
        let mut state = self.state.lock().expect("catalogue state lock");

        // Stage the replacement first so a failing row leaves state intact.
        let now = Utc::now();
        let mut staged = Vec::with_capacity(drafts.len());
        for draft in drafts {
            if state.ingredient(draft.ingredient_id()).is_none() {
                return Err(CompositionStoreError::ingredient_missing());
            }
            if staged
                .iter()
                .any(|row: &CompositionRow| row.ingredient_id == draft.ingredient_id())
            {
                return Err(CompositionStoreError::duplicate_pair());
            }
            staged.push(CompositionRow {
                recipe_id,
                ingredient_id: draft.ingredient_id(),
                quantity: draft.quantity(),
                unit: draft.unit().to_owned(),
                notes: draft.notes().map(str::to_owned),
                created_at: now,
                updated_at: now,
            });
        }

        state.rows.retain(|row| row.recipe_id != recipe_id);
        state.rows.extend(staged);
        Ok(state.entries_for(recipe_id))
    }
}

/// Reversible stand-in for the Argon2 adapter so endpoint tests avoid the
/// intentionally slow KDF.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

const PLAINTEXT_PREFIX: &str = "plain$";

#[async_trait]
impl PasswordHasher for PlaintextPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{PLAINTEXT_PREFIX}{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        Ok(hash
            .strip_prefix(PLAINTEXT_PREFIX)
            .is_some_and(|stored| stored == password))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn draft(ingredient_id: i64, quantity: f64, unit: &str) -> CompositionDraft {
        CompositionDraft::new(ingredient_id, quantity, unit, None).expect("valid draft")
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = InMemoryUsers::new();
        users.insert("a@b.com", "hash").await.expect("first insert");
        let err = users.insert("a@b.com", "hash").await.expect_err("dup");
        assert_eq!(err, UserStoreError::DuplicateEmail);
    }

    #[tokio::test]
    async fn ingredient_delete_refused_while_referenced() {
        let catalogue = InMemoryCatalogue::new();
        let ingredient = IngredientRepository::insert(
            &catalogue,
            &IngredientDraft::new("Tomato", None, None).expect("draft"),
        )
        .await
        .expect("ingredient");
        let recipe = RecipeRepository::insert(
            &catalogue,
            1,
            &RecipeDraft::new("Soup", None, None).expect("draft"),
        )
        .await
        .expect("recipe");
        CompositionRepository::insert(&catalogue, recipe.id, &draft(ingredient.id, 2.0, "pieces"))
            .await
            .expect("row");

        let err = IngredientRepository::delete(&catalogue, ingredient.id)
            .await
            .expect_err("still referenced");
        assert_eq!(err, IngredientStoreError::StillReferenced);

        RecipeRepository::delete(&catalogue, recipe.id)
            .await
            .expect("recipe delete");
        let deleted = IngredientRepository::delete(&catalogue, ingredient.id)
            .await
            .expect("now unreferenced");
        assert!(deleted);
    }

    #[tokio::test]
    async fn replace_all_is_atomic() {
        let catalogue = InMemoryCatalogue::new();
        let tomato = IngredientRepository::insert(
            &catalogue,
            &IngredientDraft::new("Tomato", None, None).expect("draft"),
        )
        .await
        .expect("ingredient");
        let recipe = RecipeRepository::insert(
            &catalogue,
            1,
            &RecipeDraft::new("Soup", None, None).expect("draft"),
        )
        .await
        .expect("recipe");
        CompositionRepository::insert(&catalogue, recipe.id, &draft(tomato.id, 2.0, "pieces"))
            .await
            .expect("row");

        // Second draft references a missing ingredient; nothing must change.
        let err = catalogue
            .replace_all(recipe.id, &[draft(tomato.id, 1.0, "pieces"), draft(999, 1.0, "g")])
            .await
            .expect_err("missing ingredient");
        assert_eq!(err, CompositionStoreError::IngredientMissing);

        let entries = catalogue
            .entries_for_recipe(recipe.id)
            .await
            .expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 2.0);
    }

    #[tokio::test]
    async fn plaintext_hasher_round_trips() {
        let hasher = PlaintextPasswordHasher;
        let hash = hasher.hash("secret").await.expect("hash");
        assert!(hasher.verify("secret", &hash).await.expect("verify"));
        assert!(!hasher.verify("other", &hash).await.expect("verify"));
    }
}
