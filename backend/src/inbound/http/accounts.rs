//! Credential lifecycle handlers.
//!
//! ```text
//! POST /register {"email":"cook@example.com","password":"securepassword123"}
//! POST /login    {"email":"cook@example.com","password":"securepassword123"}
//! GET  /auth/me   (gateway headers required)
//! ```

use actix_web::{get, post, web, HttpResponse};

use crate::domain::Credentials;
use crate::inbound::http::dto::{AuthResponse, CredentialsRequest, UserDto};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::AuthState;
use crate::inbound::http::ApiResult;
use crate::middleware::GatewayUser;

/// Register a new account and issue its first token.
#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    tags = ["auth"],
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing field or weak password", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AuthState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials::for_registration(&payload.email, &payload.password)?;
    let authenticated = state.accounts.register(&credentials).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(authenticated)))
}

/// Authenticate existing credentials and issue a fresh token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    tags = ["auth"],
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 401, description = "Unknown email or wrong password", body = ErrorBody)
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AuthState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let payload = payload.into_inner();
    let credentials = Credentials::for_login(&payload.email, &payload.password)?;
    let authenticated = state.accounts.login(&credentials).await?;
    Ok(web::Json(AuthResponse::from(authenticated)))
}

/// The user record behind the gateway-injected principal.
#[utoipa::path(
    get,
    path = "/auth/me",
    tags = ["auth"],
    responses(
        (status = 200, description = "The authenticated user", body = UserDto),
        (status = 401, description = "No principal attached", body = ErrorBody),
        (status = 404, description = "Principal no longer exists", body = ErrorBody)
    )
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<AuthState>, user: GatewayUser) -> ApiResult<web::Json<UserDto>> {
    let current = state.accounts.current_user(&user.0).await?;
    Ok(web::Json(UserDto::from(current)))
}
