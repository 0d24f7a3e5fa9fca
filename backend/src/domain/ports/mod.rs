//! Driving and driven ports for the domain services.
//!
//! Repositories are expressed as capability sets: each trait lists exactly
//! the operations a service needs, so tests substitute in-memory adapters
//! and the HTTP layer never imports persistence types.

mod macros;

mod category_repository;
mod clock;
mod composition_repository;
mod ingredient_repository;
mod password_hasher;
mod recipe_repository;
mod token_issuer;
mod user_repository;

pub(crate) use macros::define_port_error;

pub use category_repository::{CategoryRepository, CategoryStoreError};
pub use clock::{Clock, SystemClock};
pub use composition_repository::{CompositionRepository, CompositionStoreError};
pub use ingredient_repository::{IngredientRepository, IngredientStoreError};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use recipe_repository::{RecipeRepository, RecipeStoreError};
pub use token_issuer::{TokenIssueError, TokenIssuer};
pub use user_repository::{UserRepository, UserStoreError};
