//! PostgreSQL-backed [`CategoryRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryStoreError};
use crate::domain::Category;

use super::error_map::{diesel_error_message, pool_error_message};
use super::models::CategoryRow;
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel implementation of the category-lookup port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create the adapter over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryStoreError {
    CategoryStoreError::connection(pool_error_message(error))
}

fn map_query_error(error: &diesel::result::Error) -> CategoryStoreError {
    CategoryStoreError::query(diesel_error_message(error, "category query"))
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        categories::table
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Category::from).collect())
            .map_err(|err| map_query_error(&err))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, CategoryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Category::from))
            .map_err(|err| map_query_error(&err))
    }
}
