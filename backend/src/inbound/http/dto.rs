//! Wire DTOs for both services.
//!
//! Requests validate into domain drafts through `TryFrom`; responses are
//! built with `From` off the domain entities. The password hash never has a
//! field here, so it cannot be serialised by accident.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::grocery::GroceryItem;
use crate::domain::recipe_service::RecipeView;
use crate::domain::{
    Category, CompositionDraft, CompositionEntry, CompositionUpdate, Error, Ingredient,
    IngredientDraft, Recipe, RecipeDraft, User,
};

/// Registration and login payload.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    /// Email address; trimmed and lowercased before use.
    pub email: String,
    /// Plain-text password; at least six characters for registration.
    pub password: String,
}

/// User representation returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    /// Server-generated identifier.
    pub id: i64,
    /// Canonical (lowercased) email.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    /// Signed bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: UserDto,
}

impl From<crate::domain::AuthenticatedUser> for AuthResponse {
    fn from(authenticated: crate::domain::AuthenticatedUser) -> Self {
        Self {
            token: authenticated.token,
            user: UserDto::from(authenticated.user),
        }
    }
}

/// Create/update payload for a recipe.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RecipeRequest {
    /// Display name; must survive trimming.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional category reference.
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl TryFrom<RecipeRequest> for RecipeDraft {
    type Error = Error;

    fn try_from(value: RecipeRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, value.description, value.category_id)
    }
}

/// Recipe representation, with composition attached on request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeDto {
    /// Server-generated identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category reference.
    pub category_id: Option<i64>,
    /// The principal that created the recipe.
    pub owner_user_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Composition rows, present only when `include_ingredients` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<RecipeIngredientDto>>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            category_id: recipe.category_id,
            owner_user_id: recipe.owner_user_id,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
            ingredients: None,
        }
    }
}

impl From<RecipeView> for RecipeDto {
    fn from(view: RecipeView) -> Self {
        let mut dto = Self::from(view.recipe);
        dto.ingredients = view
            .composition
            .map(|entries| entries.into_iter().map(RecipeIngredientDto::from).collect());
        dto
    }
}

/// Create/update payload for an ingredient.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct IngredientRequest {
    /// Unique display name; must survive trimming.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional free-text category label.
    #[serde(default)]
    pub category: Option<String>,
}

impl TryFrom<IngredientRequest> for IngredientDraft {
    type Error = Error;

    fn try_from(value: IngredientRequest) -> Result<Self, Self::Error> {
        Self::new(&value.name, value.description, value.category)
    }
}

/// Ingredient representation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IngredientDto {
    /// Server-generated identifier.
    pub id: i64,
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional free-text category label.
    pub category: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Ingredient> for IngredientDto {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            description: ingredient.description,
            category: ingredient.category,
            created_at: ingredient.created_at,
            updated_at: ingredient.updated_at,
        }
    }
}

/// Category representation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoryDto {
    /// Server-generated identifier.
    pub id: i64,
    /// Unique category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
        }
    }
}

/// One composition row with its ingredient joined.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeIngredientDto {
    /// The owning recipe.
    pub recipe_id: i64,
    /// The referenced ingredient.
    pub ingredient: IngredientDto,
    /// Positive culinary quantity.
    pub quantity: f64,
    /// Free-text unit.
    pub unit: String,
    /// Optional preparation notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<CompositionEntry> for RecipeIngredientDto {
    fn from(entry: CompositionEntry) -> Self {
        Self {
            recipe_id: entry.recipe_id,
            ingredient: IngredientDto::from(entry.ingredient),
            quantity: entry.quantity,
            unit: entry.unit,
            notes: entry.notes,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Payload adding one ingredient to a recipe's composition.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RecipeIngredientRequest {
    /// The ingredient to reference.
    pub ingredient_id: i64,
    /// Positive quantity.
    pub quantity: f64,
    /// Non-empty unit.
    pub unit: String,
    /// Optional preparation notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<RecipeIngredientRequest> for CompositionDraft {
    type Error = Error;

    fn try_from(value: RecipeIngredientRequest) -> Result<Self, Self::Error> {
        Self::new(value.ingredient_id, value.quantity, &value.unit, value.notes)
    }
}

/// Payload updating one composition row in place.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RecipeIngredientUpdateRequest {
    /// Positive quantity.
    pub quantity: f64,
    /// Non-empty unit.
    pub unit: String,
    /// Optional preparation notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<RecipeIngredientUpdateRequest> for CompositionUpdate {
    type Error = Error;

    fn try_from(value: RecipeIngredientUpdateRequest) -> Result<Self, Self::Error> {
        Self::new(value.quantity, &value.unit, value.notes)
    }
}

/// Payload replacing a recipe's whole composition.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SetRecipeIngredientsRequest {
    /// The full desired composition.
    pub ingredients: Vec<RecipeIngredientRequest>,
}

/// Payload for grocery-list generation.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GroceryListRequest {
    /// Recipes contributing to the list; must be non-empty.
    pub recipe_ids: Vec<i64>,
}

/// One aggregated grocery item.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GroceryItemDto {
    /// The aggregated ingredient's id.
    pub ingredient_id: i64,
    /// The aggregated ingredient's display name.
    pub ingredient: String,
    /// Summed quantity, or `-1` when contributing units conflict.
    pub total_quantity: f64,
    /// Unit of the first contribution.
    pub unit: String,
    /// Names of every contributing recipe.
    pub recipes: Vec<String>,
}

impl From<GroceryItem> for GroceryItemDto {
    fn from(item: GroceryItem) -> Self {
        Self {
            ingredient_id: item.ingredient_id,
            ingredient: item.ingredient_name,
            total_quantity: item.total.as_wire_quantity(),
            unit: item.unit,
            recipes: item.recipes,
        }
    }
}

/// Query flag selecting whether list/get responses pay for the join.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IncludeIngredientsQuery {
    /// `include_ingredients=true` attaches composition rows.
    #[serde(default)]
    pub include_ingredients: bool,
}

/// Query parameters for the public ingredient listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientListQuery {
    /// Case-insensitive substring match on the name.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact match on the free-text category label.
    #[serde(default)]
    pub category: Option<String>,
}

/// Query parameters for the recipes-containing-all search.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSearchQuery {
    /// Comma-separated list of positive ingredient ids.
    pub ingredient_ids: String,
    /// `include_ingredients=true` attaches composition rows.
    #[serde(default)]
    pub include_ingredients: bool,
}
