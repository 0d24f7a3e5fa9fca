//! PostgreSQL-backed [`IngredientRepository`] adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IngredientRepository, IngredientStoreError};
use crate::domain::{Ingredient, IngredientDraft, IngredientFilter};

use super::error_map::{
    diesel_error_message, is_foreign_key_violation, is_unique_violation, pool_error_message,
};
use super::models::{IngredientChangeset, IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel implementation of the ingredient-catalogue port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create the adapter over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngredientStoreError {
    IngredientStoreError::connection(pool_error_message(error))
}

fn map_query_error(error: &diesel::result::Error) -> IngredientStoreError {
    IngredientStoreError::query(diesel_error_message(error, "ingredient query"))
}

fn map_write_error(error: &diesel::result::Error) -> IngredientStoreError {
    if is_unique_violation(error) {
        IngredientStoreError::duplicate_name()
    } else {
        map_query_error(error)
    }
}

/// Escape the LIKE metacharacters so user input matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn list(
        &self,
        filter: &IngredientFilter,
    ) -> Result<Vec<Ingredient>, IngredientStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = ingredients::table
            .order(ingredients::name.asc())
            .select(IngredientRow::as_select())
            .into_boxed();
        let query = match filter {
            IngredientFilter::All => query,
            IngredientFilter::NameContains(term) => {
                query.filter(ingredients::name.ilike(format!("%{}%", escape_like(term))))
            }
            IngredientFilter::CategoryEquals(label) => {
                query.filter(ingredients::category.eq(label.as_str()))
            }
        };
        query
            .load(&mut conn)
            .await
            .map(|rows: Vec<IngredientRow>| rows.into_iter().map(Ingredient::from).collect())
            .map_err(|err| map_query_error(&err))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, IngredientStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        ingredients::table
            .find(id)
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Ingredient::from))
            .map_err(|err| map_query_error(&err))
    }

    async fn insert(&self, draft: &IngredientDraft) -> Result<Ingredient, IngredientStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(ingredients::table)
            .values(&NewIngredientRow {
                name: draft.name(),
                description: draft.description(),
                category: draft.category(),
            })
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Ingredient::from)
            .map_err(|err| map_write_error(&err))
    }

    async fn update(
        &self,
        id: i64,
        draft: &IngredientDraft,
    ) -> Result<Option<Ingredient>, IngredientStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(ingredients::table.find(id))
            .set(&IngredientChangeset {
                name: draft.name(),
                description: draft.description(),
                category: draft.category(),
                updated_at: Utc::now(),
            })
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Ingredient::from))
            .map_err(|err| map_write_error(&err))
    }

    async fn delete(&self, id: i64) -> Result<bool, IngredientStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::delete(ingredients::table.find(id))
            .execute(&mut conn)
            .await
        {
            Ok(count) => Ok(count > 0),
            // The restricting foreign key from `recipe_ingredients` refuses
            // deletion while any composition row still references the row.
            Err(err) if is_foreign_key_violation(&err) => {
                Err(IngredientStoreError::still_referenced())
            }
            Err(err) => Err(map_query_error(&err)),
        }
    }
}
