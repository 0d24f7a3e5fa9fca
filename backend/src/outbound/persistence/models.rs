//! Row structs bridging the Diesel tables and the domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Category, Ingredient, Recipe, User};

use super::schema::{categories, ingredients, recipe_ingredients, recipes, users};

/// A `auth.users` row as read.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for `auth.users`; timestamps default in the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// A `categories` row as read.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// An `ingredients` row as read.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for `ingredients`.
#[derive(Debug, Insertable)]
#[diesel(table_name = ingredients)]
pub struct NewIngredientRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Update payload for `ingredients`; `None` clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = ingredients)]
#[diesel(treat_none_as_null = true)]
pub struct IngredientChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// A `recipes` row as read.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub owner_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            owner_user_id: row.owner_user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for `recipes`.
#[derive(Debug, Insertable)]
#[diesel(table_name = recipes)]
pub struct NewRecipeRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category_id: Option<i64>,
    pub owner_user_id: i64,
}

/// Update payload for `recipes`; the owner column is deliberately absent
/// because ownership is immutable.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

/// A `recipe_ingredients` row as read.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `recipe_ingredients`.
#[derive(Debug, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub struct NewRecipeIngredientRow<'a> {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: &'a str,
    pub notes: Option<&'a str>,
}

/// Update payload for one `recipe_ingredients` row.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = recipe_ingredients)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeIngredientChangeset<'a> {
    pub quantity: f64,
    pub unit: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
