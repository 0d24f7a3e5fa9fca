//! OpenAPI documents for both services.
//!
//! Each binary mounts Swagger UI in debug builds over its own document; the
//! path tables below mirror the route registration in [`crate::server`].

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::dto::{
    AuthResponse, CategoryDto, CredentialsRequest, GroceryItemDto, GroceryListRequest,
    IngredientDto, IngredientRequest, RecipeDto, RecipeIngredientDto, RecipeIngredientRequest,
    RecipeIngredientUpdateRequest, RecipeRequest, SetRecipeIngredientsRequest, UserDto,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::health::HealthBody;

/// Document the gateway-injected identity headers as the security scheme.
struct GatewayHeaders;

impl Modify for GatewayHeaders {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "GatewayHeaders",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Injected by the gateway after bearer-token verification, \
                 together with X-User-Email.",
            ))),
        );
    }
}

/// OpenAPI document for the auth service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&GatewayHeaders),
    info(
        title = "Meal-prep auth service",
        description = "Registration, login, and principal introspection."
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::me,
        crate::inbound::http::health::health,
    ),
    components(schemas(CredentialsRequest, AuthResponse, UserDto, ErrorBody, HealthBody)),
    tags(
        (name = "auth", description = "Credential lifecycle"),
        (name = "health", description = "Probes")
    )
)]
pub struct AuthApiDoc;

/// OpenAPI document for the recipe-catalogue service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&GatewayHeaders),
    info(
        title = "Meal-prep recipe catalogue",
        description = "Recipes, ingredients, composition, and grocery aggregation."
    ),
    paths(
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::composition::recipe_composition,
        crate::inbound::http::composition::add_recipe_ingredient,
        crate::inbound::http::composition::set_recipe_ingredients,
        crate::inbound::http::composition::update_recipe_ingredient,
        crate::inbound::http::composition::remove_recipe_ingredient,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::ingredients::recipes_using_ingredient,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::update_ingredient,
        crate::inbound::http::ingredients::delete_ingredient,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::category_recipes,
        crate::inbound::http::grocery::grocery_list,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        RecipeRequest,
        RecipeDto,
        IngredientRequest,
        IngredientDto,
        CategoryDto,
        RecipeIngredientRequest,
        RecipeIngredientUpdateRequest,
        SetRecipeIngredientsRequest,
        RecipeIngredientDto,
        GroceryListRequest,
        GroceryItemDto,
        ErrorBody,
        HealthBody
    )),
    tags(
        (name = "recipes", description = "Recipe CRUD and search"),
        (name = "composition", description = "Recipe-ingredient rows"),
        (name = "ingredients", description = "Shared ingredient catalogue"),
        (name = "categories", description = "Category lookups"),
        (name = "grocery", description = "Grocery aggregation"),
        (name = "health", description = "Probes")
    )
)]
pub struct CatalogueApiDoc;
