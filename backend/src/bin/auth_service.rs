//! Auth service entry-point: register, login, principal introspection.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::domain::ports::SystemClock;
use backend::domain::AccountService;
#[cfg(debug_assertions)]
use backend::doc::AuthApiDoc;
use backend::inbound::http::state::AuthState;
use backend::outbound::crypto::Argon2PasswordHasher;
use backend::outbound::persistence::{
    run_pending_migrations, DbPool, DieselUserRepository, PoolConfig,
};
use backend::server::{self, ServiceConfig, DEFAULT_AUTH_PORT};
use backend::token::{TokenConfig, TokenSigner};
use backend::{ExtractUserFromGatewayHeaders, Trace};

fn fatal(error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(error.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::init_tracing();

    let config = ServiceConfig::from_env("AUTH_SERVICE_PORT", DEFAULT_AUTH_PORT).map_err(fatal)?;
    let jwt = TokenConfig::from_env().map_err(fatal)?;

    run_pending_migrations(&config.database_url)
        .await
        .map_err(fatal)?;
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(fatal)?;

    let accounts = AccountService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher),
        Arc::new(TokenSigner::new(jwt, Arc::new(SystemClock))),
    );
    let routes = server::auth_routes(web::Data::new(AuthState { accounts }));

    HttpServer::new(move || {
        let app = App::new()
            .wrap(ExtractUserFromGatewayHeaders)
            .wrap(Trace)
            .configure(routes.clone());
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", AuthApiDoc::openapi()),
        );
        app
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
