//! Grocery-list aggregation handler.

use actix_web::{post, web};

use crate::domain::Error;
use crate::inbound::http::dto::{GroceryItemDto, GroceryListRequest};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::CatalogueState;
use crate::inbound::http::ApiResult;
use crate::middleware::GatewayUser;

/// Aggregate the composition of the listed recipes into grocery items.
///
/// Missing recipe ids contribute nothing. Two contributions to the same
/// ingredient with differing units degrade that item's `total_quantity` to
/// the `-1` sentinel; reconciliation is left to the caller.
#[utoipa::path(
    post,
    path = "/grocery-list",
    request_body = GroceryListRequest,
    tags = ["grocery"],
    responses(
        (status = 200, description = "Aggregated grocery items", body = [GroceryItemDto]),
        (status = 400, description = "Empty recipe list", body = ErrorBody),
        (status = 401, description = "No principal attached", body = ErrorBody)
    )
)]
#[post("/grocery-list")]
pub async fn grocery_list(
    state: web::Data<CatalogueState>,
    _user: GatewayUser,
    payload: web::Json<GroceryListRequest>,
) -> ApiResult<web::Json<Vec<GroceryItemDto>>> {
    let payload = payload.into_inner();
    if payload.recipe_ids.is_empty() {
        return Err(Error::invalid_input("recipe_ids must not be empty"));
    }
    let items = state.grocery.generate(&payload.recipe_ids).await?;
    Ok(web::Json(items.into_iter().map(GroceryItemDto::from).collect()))
}
