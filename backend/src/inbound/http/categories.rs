//! Category read handlers.
//!
//! Categories have no write endpoints; rows arrive via migrations or
//! operator tooling.

use actix_web::{get, web};

use crate::inbound::http::dto::{CategoryDto, RecipeDto};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::CatalogueState;
use crate::inbound::http::validation::positive_id;
use crate::inbound::http::ApiResult;

/// List every category.
#[utoipa::path(
    get,
    path = "/categories",
    tags = ["categories"],
    responses((status = 200, description = "All categories", body = [CategoryDto]))
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<CatalogueState>,
) -> ApiResult<web::Json<Vec<CategoryDto>>> {
    let categories = state.recipes.categories().await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryDto::from).collect(),
    ))
}

/// Recipes assigned to an existing category.
#[utoipa::path(
    get,
    path = "/categories/{id}/recipes",
    params(("id" = i64, Path, description = "Category id")),
    tags = ["categories"],
    responses(
        (status = 200, description = "Recipes in the category", body = [RecipeDto]),
        (status = 404, description = "No such category", body = ErrorBody)
    )
)]
#[get("/categories/{id}/recipes")]
pub async fn category_recipes(
    state: web::Data<CatalogueState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<RecipeDto>>> {
    let id = positive_id(path.into_inner())?;
    let recipes = state.recipes.by_category(id).await?;
    Ok(web::Json(recipes.into_iter().map(RecipeDto::from).collect()))
}
