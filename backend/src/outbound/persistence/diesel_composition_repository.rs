//! PostgreSQL-backed [`CompositionRepository`] adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;

use crate::domain::ports::{CompositionRepository, CompositionStoreError};
use crate::domain::{CompositionDraft, CompositionEntry, CompositionUpdate, Ingredient};

use super::error_map::{
    diesel_error_message, is_foreign_key_violation, is_unique_violation, pool_error_message,
};
use super::models::{
    IngredientRow, NewRecipeIngredientRow, RecipeIngredientChangeset, RecipeIngredientRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipe_ingredients};

/// Diesel implementation of the composition-storage port.
#[derive(Clone)]
pub struct DieselCompositionRepository {
    pool: DbPool,
}

impl DieselCompositionRepository {
    /// Create the adapter over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompositionStoreError {
    CompositionStoreError::connection(pool_error_message(error))
}

fn map_query_error(error: &diesel::result::Error) -> CompositionStoreError {
    CompositionStoreError::query(diesel_error_message(error, "composition query"))
}

fn map_write_error(error: &diesel::result::Error) -> CompositionStoreError {
    if is_unique_violation(error) {
        CompositionStoreError::duplicate_pair()
    } else if is_foreign_key_violation(error) {
        // The recipe row is guaranteed by the ownership gate upstream, so a
        // foreign-key failure here names the ingredient.
        CompositionStoreError::ingredient_missing()
    } else {
        map_query_error(error)
    }
}

fn join_entry(row: RecipeIngredientRow, ingredient: IngredientRow) -> CompositionEntry {
    CompositionEntry {
        recipe_id: row.recipe_id,
        ingredient: Ingredient::from(ingredient),
        quantity: row.quantity,
        unit: row.unit,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

async fn load_entries(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
) -> Result<Vec<CompositionEntry>, diesel::result::Error> {
    let rows: Vec<(RecipeIngredientRow, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe_id))
        .order(recipe_ingredients::created_at.asc())
        .select((
            RecipeIngredientRow::as_select(),
            IngredientRow::as_select(),
        ))
        .load(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(row, ingredient)| join_entry(row, ingredient))
        .collect())
}

#[async_trait]
impl CompositionRepository for DieselCompositionRepository {
    async fn entries_for_recipe(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<CompositionEntry>, CompositionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_entries(&mut conn, recipe_id)
            .await
            .map_err(|err| map_query_error(&err))
    }

    async fn insert(
        &self,
        recipe_id: i64,
        draft: &CompositionDraft,
    ) -> Result<CompositionEntry, CompositionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: RecipeIngredientRow = diesel::insert_into(recipe_ingredients::table)
            .values(&NewRecipeIngredientRow {
                recipe_id,
                ingredient_id: draft.ingredient_id(),
                quantity: draft.quantity(),
                unit: draft.unit(),
                notes: draft.notes(),
            })
            .returning(RecipeIngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(&err))?;

        let ingredient: IngredientRow = ingredients::table
            .find(row.ingredient_id)
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_query_error(&err))?;
        Ok(join_entry(row, ingredient))
    }

    async fn update(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        update: &CompositionUpdate,
    ) -> Result<Option<CompositionEntry>, CompositionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeIngredientRow> =
            diesel::update(recipe_ingredients::table.find((recipe_id, ingredient_id)))
                .set(&RecipeIngredientChangeset {
                    quantity: update.quantity(),
                    unit: update.unit(),
                    notes: update.notes(),
                    updated_at: Utc::now(),
                })
                .returning(RecipeIngredientRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_query_error(&err))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let ingredient: IngredientRow = ingredients::table
            .find(row.ingredient_id)
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_query_error(&err))?;
        Ok(Some(join_entry(row, ingredient)))
    }

    async fn remove(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
    ) -> Result<bool, CompositionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(recipe_ingredients::table.find((recipe_id, ingredient_id)))
            .execute(&mut conn)
            .await
            .map(|count| count > 0)
            .map_err(|err| map_query_error(&err))
    }

    async fn replace_all(
        &self,
        recipe_id: i64,
        drafts: &[CompositionDraft],
    ) -> Result<Vec<CompositionEntry>, CompositionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewRecipeIngredientRow<'_>> = drafts
            .iter()
            .map(|draft| NewRecipeIngredientRow {
                recipe_id,
                ingredient_id: draft.ingredient_id(),
                quantity: draft.quantity(),
                unit: draft.unit(),
                notes: draft.notes(),
            })
            .collect();

        // Delete-then-insert in one transaction: readers never observe a
        // half-replaced composition, and a failing row rolls everything back.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
                )
                .execute(conn)
                .await?;
                if !rows.is_empty() {
                    diesel::insert_into(recipe_ingredients::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                load_entries(conn, recipe_id).await
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_write_error(&err))
    }
}
