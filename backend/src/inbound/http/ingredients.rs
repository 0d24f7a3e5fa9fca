//! Shared ingredient-catalogue handlers.
//!
//! Reads are public; mutations require a principal but no ownership, since
//! ingredients form a catalogue shared by every user.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::{IngredientDraft, IngredientFilter};
use crate::inbound::http::dto::{
    IngredientDto, IngredientListQuery, IngredientRequest, RecipeDto,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::CatalogueState;
use crate::inbound::http::validation::positive_id;
use crate::inbound::http::ApiResult;
use crate::middleware::GatewayUser;

/// List ingredients, optionally filtered.
///
/// `search` (case-insensitive substring on the name) and `category` (exact
/// label match) are mutually exclusive; `search` wins when both are present.
#[utoipa::path(
    get,
    path = "/ingredients",
    params(
        ("search" = Option<String>, Query, description = "Substring match on the name"),
        ("category" = Option<String>, Query, description = "Exact category label match")
    ),
    tags = ["ingredients"],
    responses((status = 200, description = "Matching ingredients", body = [IngredientDto]))
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<CatalogueState>,
    query: web::Query<IngredientListQuery>,
) -> ApiResult<web::Json<Vec<IngredientDto>>> {
    let filter = IngredientFilter::from_query(query.search.as_deref(), query.category.as_deref());
    let ingredients = state.ingredients.list(&filter).await?;
    Ok(web::Json(
        ingredients.into_iter().map(IngredientDto::from).collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    tags = ["ingredients"],
    responses(
        (status = 200, description = "The ingredient", body = IngredientDto),
        (status = 404, description = "No such ingredient", body = ErrorBody)
    )
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<CatalogueState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IngredientDto>> {
    let id = positive_id(path.into_inner())?;
    let ingredient = state.ingredients.get(id).await?;
    Ok(web::Json(IngredientDto::from(ingredient)))
}

/// Recipes whose composition uses the ingredient.
#[utoipa::path(
    get,
    path = "/ingredients/{id}/recipes",
    params(("id" = i64, Path, description = "Ingredient id")),
    tags = ["ingredients"],
    responses(
        (status = 200, description = "Recipes using the ingredient", body = [RecipeDto]),
        (status = 404, description = "No such ingredient", body = ErrorBody)
    )
)]
#[get("/ingredients/{id}/recipes")]
pub async fn recipes_using_ingredient(
    state: web::Data<CatalogueState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<RecipeDto>>> {
    let id = positive_id(path.into_inner())?;
    let recipes = state.ingredients.recipes_using(id).await?;
    Ok(web::Json(recipes.into_iter().map(RecipeDto::from).collect()))
}

/// Create a catalogue ingredient.
#[utoipa::path(
    post,
    path = "/ingredients",
    request_body = IngredientRequest,
    tags = ["ingredients"],
    responses(
        (status = 201, description = "Ingredient created", body = IngredientDto),
        (status = 400, description = "Name missing", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody)
    )
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<CatalogueState>,
    _user: GatewayUser,
    payload: web::Json<IngredientRequest>,
) -> ApiResult<HttpResponse> {
    let draft = IngredientDraft::try_from(payload.into_inner())?;
    let ingredient = state.ingredients.create(&draft).await?;
    Ok(HttpResponse::Created().json(IngredientDto::from(ingredient)))
}

/// Update a catalogue ingredient in place.
#[utoipa::path(
    put,
    path = "/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = IngredientRequest,
    tags = ["ingredients"],
    responses(
        (status = 200, description = "Updated ingredient", body = IngredientDto),
        (status = 400, description = "Name missing", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 404, description = "No such ingredient", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody)
    )
)]
#[put("/ingredients/{id}")]
pub async fn update_ingredient(
    state: web::Data<CatalogueState>,
    _user: GatewayUser,
    path: web::Path<i64>,
    payload: web::Json<IngredientRequest>,
) -> ApiResult<web::Json<IngredientDto>> {
    let id = positive_id(path.into_inner())?;
    let draft = IngredientDraft::try_from(payload.into_inner())?;
    let ingredient = state.ingredients.update(id, &draft).await?;
    Ok(web::Json(IngredientDto::from(ingredient)))
}

/// Delete an ingredient no recipe references any more.
#[utoipa::path(
    delete,
    path = "/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    tags = ["ingredients"],
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 404, description = "No such ingredient", body = ErrorBody),
        (status = 409, description = "Still referenced by recipes", body = ErrorBody)
    )
)]
#[delete("/ingredients/{id}")]
pub async fn delete_ingredient(
    state: web::Data<CatalogueState>,
    _user: GatewayUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = positive_id(path.into_inner())?;
    state.ingredients.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
