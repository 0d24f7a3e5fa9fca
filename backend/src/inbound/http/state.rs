//! Shared HTTP adapter state.
//!
//! Handlers accept these bundles via `actix_web::web::Data`, so they depend
//! only on domain services and stay testable with in-memory adapters.

use crate::domain::{AccountService, GroceryService, IngredientService, RecipeService};

/// Dependency bundle for the auth service handlers.
#[derive(Clone)]
pub struct AuthState {
    /// Credential lifecycle use-cases.
    pub accounts: AccountService,
}

/// Dependency bundle for the recipe-catalogue handlers.
#[derive(Clone)]
pub struct CatalogueState {
    /// Recipe CRUD, composition curation, and category reads.
    pub recipes: RecipeService,
    /// Shared ingredient catalogue use-cases.
    pub ingredients: IngredientService,
    /// Grocery-list aggregation.
    pub grocery: GroceryService,
}
