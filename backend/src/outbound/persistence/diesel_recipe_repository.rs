//! PostgreSQL-backed [`RecipeRepository`] adapter.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRepository, RecipeStoreError};
use crate::domain::{Recipe, RecipeDraft};

use super::error_map::{diesel_error_message, pool_error_message};
use super::models::{NewRecipeRow, RecipeChangeset, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{recipe_ingredients, recipes};

/// Diesel implementation of the recipe-storage port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create the adapter over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeStoreError {
    RecipeStoreError::connection(pool_error_message(error))
}

fn map_query_error(error: &diesel::result::Error) -> RecipeStoreError {
    RecipeStoreError::query(diesel_error_message(error, "recipe query"))
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        recipes::table
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Recipe::from).collect())
            .map_err(|err| map_query_error(&err))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Recipe::from))
            .map_err(|err| map_query_error(&err))
    }

    async fn find_owner(&self, id: i64) -> Result<Option<i64>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        recipes::table
            .find(id)
            .select(recipes::owner_user_id)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_query_error(&err))
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        recipes::table
            .filter(recipes::category_id.eq(category_id))
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Recipe::from).collect())
            .map_err(|err| map_query_error(&err))
    }

    async fn list_using_ingredient(
        &self,
        ingredient_id: i64,
    ) -> Result<Vec<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let referencing = recipe_ingredients::table
            .filter(recipe_ingredients::ingredient_id.eq(ingredient_id))
            .select(recipe_ingredients::recipe_id);
        recipes::table
            .filter(recipes::id.eq_any(referencing))
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Recipe::from).collect())
            .map_err(|err| map_query_error(&err))
    }

    async fn list_containing_all(
        &self,
        ingredient_ids: &[i64],
    ) -> Result<Vec<Recipe>, RecipeStoreError> {
        // Deduplicate so the distinct-count comparison is exact.
        let wanted: BTreeSet<i64> = ingredient_ids.iter().copied().collect();
        let wanted_count = i64::try_from(wanted.len())
            .map_err(|_| RecipeStoreError::query("too many ingredient ids"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let matching = recipe_ingredients::table
            .filter(recipe_ingredients::ingredient_id.eq_any(wanted))
            .group_by(recipe_ingredients::recipe_id)
            .having(count_distinct(recipe_ingredients::ingredient_id).eq(wanted_count))
            .select(recipe_ingredients::recipe_id);
        recipes::table
            .filter(recipes::id.eq_any(matching))
            .order(recipes::id.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Recipe::from).collect())
            .map_err(|err| map_query_error(&err))
    }

    async fn insert(
        &self,
        owner_user_id: i64,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(recipes::table)
            .values(&NewRecipeRow {
                name: draft.name(),
                description: draft.description(),
                category_id: draft.category_id(),
                owner_user_id,
            })
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Recipe::from)
            .map_err(|err| map_query_error(&err))
    }

    async fn update(
        &self,
        id: i64,
        draft: &RecipeDraft,
    ) -> Result<Option<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(recipes::table.find(id))
            .set(&RecipeChangeset {
                name: draft.name(),
                description: draft.description(),
                category_id: draft.category_id(),
                updated_at: Utc::now(),
            })
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Recipe::from))
            .map_err(|err| map_query_error(&err))
    }

    async fn delete(&self, id: i64) -> Result<bool, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(recipes::table.find(id))
            .execute(&mut conn)
            .await
            .map(|count| count > 0)
            .map_err(|err| map_query_error(&err))
    }
}
