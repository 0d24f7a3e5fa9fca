//! Recipe CRUD and search handlers.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::RecipeDraft;
use crate::inbound::http::dto::{
    IncludeIngredientsQuery, RecipeDto, RecipeRequest, RecipeSearchQuery,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::CatalogueState;
use crate::inbound::http::validation::{parse_ingredient_ids, positive_id};
use crate::inbound::http::ApiResult;
use crate::middleware::GatewayUser;

/// List every recipe, optionally with composition attached.
#[utoipa::path(
    get,
    path = "/recipes",
    params(("include_ingredients" = Option<bool>, Query, description = "Attach composition rows")),
    tags = ["recipes"],
    responses((status = 200, description = "All recipes", body = [RecipeDto]))
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<CatalogueState>,
    query: web::Query<IncludeIngredientsQuery>,
) -> ApiResult<web::Json<Vec<RecipeDto>>> {
    let views = state.recipes.list(query.include_ingredients).await?;
    Ok(web::Json(views.into_iter().map(RecipeDto::from).collect()))
}

/// Recipes whose composition contains **all** listed ingredients.
///
/// Registered ahead of `/recipes/{id}` so the literal segment wins.
#[utoipa::path(
    get,
    path = "/recipes/search",
    params(
        ("ingredient_ids" = String, Query, description = "Comma-separated positive ingredient ids"),
        ("include_ingredients" = Option<bool>, Query, description = "Attach composition rows")
    ),
    tags = ["recipes"],
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeDto]),
        (status = 400, description = "Malformed or empty id list", body = ErrorBody)
    )
)]
#[get("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<CatalogueState>,
    query: web::Query<RecipeSearchQuery>,
) -> ApiResult<web::Json<Vec<RecipeDto>>> {
    let query = query.into_inner();
    let ingredient_ids = parse_ingredient_ids(&query.ingredient_ids)?;
    let views = state
        .recipes
        .containing_all(&ingredient_ids, query.include_ingredients)
        .await?;
    Ok(web::Json(views.into_iter().map(RecipeDto::from).collect()))
}

/// Fetch one recipe, optionally with composition attached.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    params(
        ("id" = i64, Path, description = "Recipe id"),
        ("include_ingredients" = Option<bool>, Query, description = "Attach composition rows")
    ),
    tags = ["recipes"],
    responses(
        (status = 200, description = "The recipe", body = RecipeDto),
        (status = 404, description = "No such recipe", body = ErrorBody)
    )
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<CatalogueState>,
    path: web::Path<i64>,
    query: web::Query<IncludeIngredientsQuery>,
) -> ApiResult<web::Json<RecipeDto>> {
    let id = positive_id(path.into_inner())?;
    let view = state.recipes.get(id, query.include_ingredients).await?;
    Ok(web::Json(RecipeDto::from(view)))
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/recipes",
    request_body = RecipeRequest,
    tags = ["recipes"],
    responses(
        (status = 201, description = "Recipe created", body = RecipeDto),
        (status = 400, description = "Name missing or category invalid", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 404, description = "Referenced category does not exist", body = ErrorBody)
    )
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = RecipeDraft::try_from(payload.into_inner())?;
    let recipe = state.recipes.create(&user.0, &draft).await?;
    Ok(HttpResponse::Created().json(RecipeDto::from(recipe)))
}

/// Update a recipe the caller owns.
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    tags = ["recipes"],
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDto),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "No such recipe", body = ErrorBody)
    )
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDto>> {
    let id = positive_id(path.into_inner())?;
    let draft = RecipeDraft::try_from(payload.into_inner())?;
    let recipe = state.recipes.update(&user.0, id, &draft).await?;
    Ok(web::Json(RecipeDto::from(recipe)))
}

/// Delete a recipe the caller owns; composition rows cascade.
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    tags = ["recipes"],
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "No such recipe", body = ErrorBody)
    )
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = positive_id(path.into_inner())?;
    state.recipes.delete(&user.0, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
