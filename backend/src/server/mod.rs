//! App assembly shared by the two service binaries.
//!
//! Each binary builds its state bundle, then passes it to the matching
//! `*_routes` function inside `HttpServer::new`. The integration tests use
//! the same functions over in-memory adapters, so the route table under test
//! is the route table deployed.

mod config;

pub use config::{ConfigError, ServiceConfig, DEFAULT_AUTH_PORT, DEFAULT_RECIPE_PORT};

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::health::{health, ServiceName};
use crate::inbound::http::state::{AuthState, CatalogueState};
use crate::inbound::http::{accounts, categories, composition, grocery, ingredients, recipes};

/// Initialise JSON tracing from `RUST_LOG`; repeated calls only warn.
pub fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

/// Route table and shared state of the auth service.
pub fn auth_routes(state: web::Data<AuthState>) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        extractor_configs(cfg);
        cfg.app_data(state.clone())
            .app_data(web::Data::new(ServiceName("auth-service")))
            .service(accounts::register)
            .service(accounts::login)
            .service(accounts::me)
            .service(health);
    }
}

/// Route table and shared state of the recipe-catalogue service.
///
/// `/recipes/search` is registered before `/recipes/{id}` so the literal
/// segment is matched first.
pub fn catalogue_routes(
    state: web::Data<CatalogueState>,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        extractor_configs(cfg);
        cfg.app_data(state.clone())
            .app_data(web::Data::new(ServiceName("recipe-service")))
            .service(recipes::search_recipes)
            .service(recipes::list_recipes)
            .service(recipes::get_recipe)
            .service(recipes::create_recipe)
            .service(recipes::update_recipe)
            .service(recipes::delete_recipe)
            .service(composition::recipe_composition)
            .service(composition::add_recipe_ingredient)
            .service(composition::set_recipe_ingredients)
            .service(composition::update_recipe_ingredient)
            .service(composition::remove_recipe_ingredient)
            .service(ingredients::list_ingredients)
            .service(ingredients::get_ingredient)
            .service(ingredients::recipes_using_ingredient)
            .service(ingredients::create_ingredient)
            .service(ingredients::update_ingredient)
            .service(ingredients::delete_ingredient)
            .service(categories::list_categories)
            .service(categories::category_recipes)
            .service(grocery::grocery_list)
            .service(health);
    }
}
