//! Gateway-header principal extraction.
//!
//! In the deployed topology the gateway terminates TLS, verifies the bearer
//! token, and rewrites the request with `X-User-Id` / `X-User-Email` before
//! fanning out. Downstream services trust those headers and never parse
//! `Authorization` themselves. [`ExtractUserFromGatewayHeaders`] materialises
//! the headers into a request-scoped [`Principal`]; handlers retrieve it with
//! the [`GatewayUser`] extractor and receive 401 when it is absent.
//!
//! Trust model: the deployment must ensure these headers cannot arrive from
//! outside the gateway (strip at ingress or keep the services unreachable).

use std::future::{ready, Ready};
use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::{Error, Principal};

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "X-User-Id";
/// Header carrying the authenticated user's email.
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

fn principal_from_headers(headers: &HeaderMap) -> Option<Principal> {
    let user_id = headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)?;
    let email = headers
        .get(USER_EMAIL_HEADER)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|email| !email.is_empty())?;
    Some(Principal::new(user_id, email))
}

/// Middleware populating the request-scoped [`Principal`] from the gateway
/// headers. Malformed or missing headers leave the request anonymous; the
/// extractor turns that into 401 only where a handler demands a principal.
#[derive(Clone)]
pub struct ExtractUserFromGatewayHeaders;

impl<S, B> Transform<S, ServiceRequest> for ExtractUserFromGatewayHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = GatewayHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewayHeadersMiddleware { service }))
    }
}

/// Service wrapper produced by [`ExtractUserFromGatewayHeaders`].
pub struct GatewayHeadersMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for GatewayHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(principal) = principal_from_headers(req.headers()) {
            req.extensions_mut().insert(principal);
        }
        self.service.call(req)
    }
}

/// Typed extractor for the gateway-injected principal.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::middleware::GatewayUser;
///
/// async fn whoami(user: GatewayUser) -> HttpResponse {
///     HttpResponse::Ok().body(user.0.email().to_owned())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GatewayUser(pub Principal);

impl FromRequest for GatewayUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .cloned()
                .map(Self)
                .ok_or_else(|| Error::unauthenticated("authentication required")),
        )
    }
}
