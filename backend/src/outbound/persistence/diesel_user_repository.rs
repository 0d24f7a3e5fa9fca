//! PostgreSQL-backed [`UserRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::User;

use super::error_map::{diesel_error_message, is_unique_violation, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the user-storage port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create the adapter over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(pool_error_message(error))
}

fn map_query_error(error: &diesel::result::Error) -> UserStoreError {
    UserStoreError::query(diesel_error_message(error, "user query"))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(&NewUserRow {
                email,
                password_hash,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(User::from)
            .map_err(|err| {
                // The unique index resolves the register race; surface it as
                // the same duplicate the pre-flight check reports.
                if is_unique_violation(&err) {
                    UserStoreError::duplicate_email()
                } else {
                    map_query_error(&err)
                }
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(|err| map_query_error(&err))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(|err| map_query_error(&err))
    }
}
