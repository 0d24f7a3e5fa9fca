//! Recipe-catalogue service entry-point: recipes, ingredients, composition,
//! and grocery aggregation.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::CatalogueApiDoc;
use backend::domain::{GroceryService, IngredientService, RecipeService};
use backend::inbound::http::state::CatalogueState;
use backend::outbound::persistence::{
    run_pending_migrations, DbPool, DieselCategoryRepository, DieselCompositionRepository,
    DieselIngredientRepository, DieselRecipeRepository, PoolConfig,
};
use backend::server::{self, ServiceConfig, DEFAULT_RECIPE_PORT};
use backend::{ExtractUserFromGatewayHeaders, Trace};

fn fatal(error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(error.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::init_tracing();

    let config =
        ServiceConfig::from_env("RECIPE_SERVICE_PORT", DEFAULT_RECIPE_PORT).map_err(fatal)?;

    run_pending_migrations(&config.database_url)
        .await
        .map_err(fatal)?;
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(fatal)?;

    let recipe_repo = Arc::new(DieselRecipeRepository::new(pool.clone()));
    let category_repo = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let ingredient_repo = Arc::new(DieselIngredientRepository::new(pool.clone()));
    let composition_repo = Arc::new(DieselCompositionRepository::new(pool));

    let state = CatalogueState {
        recipes: RecipeService::new(
            recipe_repo.clone(),
            category_repo,
            composition_repo.clone(),
        ),
        ingredients: IngredientService::new(ingredient_repo, recipe_repo.clone()),
        grocery: GroceryService::new(recipe_repo, composition_repo),
    };
    let routes = server::catalogue_routes(web::Data::new(state));

    HttpServer::new(move || {
        let app = App::new()
            .wrap(ExtractUserFromGatewayHeaders)
            .wrap(Trace)
            .configure(routes.clone());
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}")
                .url("/api-docs/openapi.json", CatalogueApiDoc::openapi()),
        );
        app
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
