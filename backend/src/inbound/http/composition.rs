//! Recipe-composition handlers: the `recipe_ingredient` rows of one recipe.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::{CompositionDraft, CompositionUpdate};
use crate::inbound::http::dto::{
    RecipeIngredientDto, RecipeIngredientRequest, RecipeIngredientUpdateRequest,
    SetRecipeIngredientsRequest,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::CatalogueState;
use crate::inbound::http::validation::positive_id;
use crate::inbound::http::ApiResult;
use crate::middleware::GatewayUser;

/// The composition of one recipe, with ingredient details joined.
#[utoipa::path(
    get,
    path = "/recipes/{id}/ingredients",
    params(("id" = i64, Path, description = "Recipe id")),
    tags = ["composition"],
    responses(
        (status = 200, description = "Composition rows", body = [RecipeIngredientDto]),
        (status = 404, description = "No such recipe", body = ErrorBody)
    )
)]
#[get("/recipes/{id}/ingredients")]
pub async fn recipe_composition(
    state: web::Data<CatalogueState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<RecipeIngredientDto>>> {
    let id = positive_id(path.into_inner())?;
    let entries = state.recipes.composition(id).await?;
    Ok(web::Json(
        entries.into_iter().map(RecipeIngredientDto::from).collect(),
    ))
}

/// Add one ingredient to a recipe the caller owns.
#[utoipa::path(
    post,
    path = "/recipes/{id}/ingredients",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeIngredientRequest,
    tags = ["composition"],
    responses(
        (status = 201, description = "Row added", body = RecipeIngredientDto),
        (status = 400, description = "Invalid quantity or unit", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "Recipe or ingredient missing", body = ErrorBody),
        (status = 409, description = "Pair already present", body = ErrorBody)
    )
)]
#[post("/recipes/{id}/ingredients")]
pub async fn add_recipe_ingredient(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    path: web::Path<i64>,
    payload: web::Json<RecipeIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let id = positive_id(path.into_inner())?;
    let draft = CompositionDraft::try_from(payload.into_inner())?;
    let entry = state.recipes.add_entry(&user.0, id, &draft).await?;
    Ok(HttpResponse::Created().json(RecipeIngredientDto::from(entry)))
}

/// Replace the whole composition of a recipe the caller owns.
///
/// Every supplied row is validated before any write; the replacement is
/// atomic, so a single bad row leaves the prior composition intact.
#[utoipa::path(
    put,
    path = "/recipes/{id}/ingredients",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = SetRecipeIngredientsRequest,
    tags = ["composition"],
    responses(
        (status = 200, description = "The re-read composition", body = [RecipeIngredientDto]),
        (status = 400, description = "An invalid row aborted the replacement", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "Recipe or ingredient missing", body = ErrorBody),
        (status = 409, description = "Duplicate ingredient in the list", body = ErrorBody)
    )
)]
#[put("/recipes/{id}/ingredients")]
pub async fn set_recipe_ingredients(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    path: web::Path<i64>,
    payload: web::Json<SetRecipeIngredientsRequest>,
) -> ApiResult<web::Json<Vec<RecipeIngredientDto>>> {
    let id = positive_id(path.into_inner())?;
    let drafts = payload
        .into_inner()
        .ingredients
        .into_iter()
        .map(CompositionDraft::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let entries = state.recipes.set_composition(&user.0, id, &drafts).await?;
    Ok(web::Json(
        entries.into_iter().map(RecipeIngredientDto::from).collect(),
    ))
}

/// Update one composition row of a recipe the caller owns.
#[utoipa::path(
    put,
    path = "/recipes/{recipe_id}/ingredients/{ingredient_id}",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id"),
        ("ingredient_id" = i64, Path, description = "Ingredient id")
    ),
    request_body = RecipeIngredientUpdateRequest,
    tags = ["composition"],
    responses(
        (status = 200, description = "Updated row", body = RecipeIngredientDto),
        (status = 400, description = "Invalid quantity or unit", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "Recipe or row missing", body = ErrorBody)
    )
)]
#[put("/recipes/{recipe_id}/ingredients/{ingredient_id}")]
pub async fn update_recipe_ingredient(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    path: web::Path<(i64, i64)>,
    payload: web::Json<RecipeIngredientUpdateRequest>,
) -> ApiResult<web::Json<RecipeIngredientDto>> {
    let (recipe_id, ingredient_id) = path.into_inner();
    let recipe_id = positive_id(recipe_id)?;
    let ingredient_id = positive_id(ingredient_id)?;
    let update = CompositionUpdate::try_from(payload.into_inner())?;
    let entry = state
        .recipes
        .update_entry(&user.0, recipe_id, ingredient_id, &update)
        .await?;
    Ok(web::Json(RecipeIngredientDto::from(entry)))
}

/// Remove one composition row from a recipe the caller owns.
#[utoipa::path(
    delete,
    path = "/recipes/{recipe_id}/ingredients/{ingredient_id}",
    params(
        ("recipe_id" = i64, Path, description = "Recipe id"),
        ("ingredient_id" = i64, Path, description = "Ingredient id")
    ),
    tags = ["composition"],
    responses(
        (status = 204, description = "Row removed"),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "Recipe or row missing", body = ErrorBody)
    )
)]
#[delete("/recipes/{recipe_id}/ingredients/{ingredient_id}")]
pub async fn remove_recipe_ingredient(
    state: web::Data<CatalogueState>,
    user: GatewayUser,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (recipe_id, ingredient_id) = path.into_inner();
    let recipe_id = positive_id(recipe_id)?;
    let ingredient_id = positive_id(ingredient_id)?;
    state
        .recipes
        .remove_entry(&user.0, recipe_id, ingredient_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
