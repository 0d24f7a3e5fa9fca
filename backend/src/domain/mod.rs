//! Domain primitives, invariants, and use-case services.
//!
//! Purpose: define strongly typed entities and the services that enforce the
//! catalogue's rules (ownership, uniqueness, composition invariants). The
//! HTTP and persistence layers depend on this module, never the other way
//! around; collaboration happens through the traits in [`ports`].

pub mod account_service;
pub mod category;
pub mod composition;
pub mod credentials;
pub mod error;
pub mod grocery;
pub mod grocery_service;
pub mod ingredient;
pub mod ingredient_service;
pub mod ports;
pub mod principal;
pub mod recipe;
pub mod recipe_service;
pub mod user;

pub use self::account_service::{AccountService, AuthenticatedUser};
pub use self::category::Category;
pub use self::composition::{CompositionDraft, CompositionEntry, CompositionUpdate};
pub use self::credentials::{Credentials, MIN_PASSWORD_LEN};
pub use self::error::{Error, ErrorKind};
pub use self::grocery_service::GroceryService;
pub use self::ingredient::{Ingredient, IngredientDraft, IngredientFilter};
pub use self::ingredient_service::IngredientService;
pub use self::principal::Principal;
pub use self::recipe::{Recipe, RecipeDraft};
pub use self::recipe_service::{RecipeService, RecipeView};
pub use self::user::User;

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
