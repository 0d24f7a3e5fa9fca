//! Shared endpoint-test harness.
//!
//! Each service is assembled through the same route functions the binaries
//! use, but over the in-memory adapters, so the tests exercise the deployed
//! route table without PostgreSQL.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::domain::ports::SystemClock;
use backend::domain::{AccountService, GroceryService, IngredientService, RecipeService};
use backend::inbound::http::state::{AuthState, CatalogueState};
use backend::middleware::ExtractUserFromGatewayHeaders;
use backend::outbound::memory::{InMemoryCatalogue, InMemoryUsers, PlaintextPasswordHasher};
use backend::server;
use backend::token::{TokenConfig, TokenSigner};

/// Secret both the harness signer and the verification assertions use.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Token configuration matching the harness signer.
pub fn token_config() -> TokenConfig {
    TokenConfig::new(TEST_SECRET)
}

/// The auth service over in-memory users and the plaintext hasher.
pub fn auth_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let accounts = AccountService::new(
        Arc::new(InMemoryUsers::new()),
        Arc::new(PlaintextPasswordHasher),
        Arc::new(TokenSigner::new(token_config(), Arc::new(SystemClock))),
    );
    App::new()
        .wrap(ExtractUserFromGatewayHeaders)
        .configure(server::auth_routes(web::Data::new(AuthState { accounts })))
}

/// The recipe-catalogue service over a shared in-memory catalogue.
pub fn catalogue_app(
    catalogue: &Arc<InMemoryCatalogue>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = CatalogueState {
        recipes: RecipeService::new(catalogue.clone(), catalogue.clone(), catalogue.clone()),
        ingredients: IngredientService::new(catalogue.clone(), catalogue.clone()),
        grocery: GroceryService::new(catalogue.clone(), catalogue.clone()),
    };
    App::new()
        .wrap(ExtractUserFromGatewayHeaders)
        .configure(server::catalogue_routes(web::Data::new(state)))
}

/// Attach the gateway identity headers to a request.
pub fn as_user(req: test::TestRequest, user_id: i64, email: &str) -> test::TestRequest {
    req.insert_header(("X-User-Id", user_id.to_string()))
        .insert_header(("X-User-Email", email.to_owned()))
}

/// Create an ingredient through the public endpoint; returns its id.
pub async fn seed_ingredient<S, B>(app: &S, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = as_user(test::TestRequest::post().uri("/ingredients"), 1, "cook@example.com")
        .set_json(json!({ "name": name }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let value: Value = test::read_body_json(res).await;
    value.get("id").and_then(Value::as_i64).expect("ingredient id")
}

/// Create a recipe owned by user 1; returns its id.
pub async fn seed_recipe<S, B>(app: &S, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = as_user(test::TestRequest::post().uri("/recipes"), 1, "cook@example.com")
        .set_json(json!({ "name": name }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let value: Value = test::read_body_json(res).await;
    value.get("id").and_then(Value::as_i64).expect("recipe id")
}

/// Add one composition row to a recipe owned by user 1.
pub async fn seed_composition_row<S, B>(
    app: &S,
    recipe_id: i64,
    ingredient_id: i64,
    quantity: f64,
    unit: &str,
) where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = as_user(
        test::TestRequest::post().uri(&format!("/recipes/{recipe_id}/ingredients")),
        1,
        "cook@example.com",
    )
    .set_json(json!({
        "ingredient_id": ingredient_id,
        "quantity": quantity,
        "unit": unit,
    }))
    .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}
