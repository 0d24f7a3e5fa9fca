//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.
//!
//! Row structs and `diesel::table!` definitions stay internal to this
//! module; the rest of the crate sees only the domain ports these adapters
//! implement.

mod diesel_category_repository;
mod diesel_composition_repository;
mod diesel_ingredient_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod error_map;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_composition_repository::DieselCompositionRepository;
pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
