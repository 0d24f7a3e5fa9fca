//! Trivial health endpoint shared by both services.

use actix_web::{get, web};
use serde::Serialize;

/// Name under which a binary reports itself in health responses.
#[derive(Debug, Clone, Copy)]
pub struct ServiceName(pub &'static str);

/// Health response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthBody {
    /// Always `"ok"` while the process serves traffic.
    pub status: &'static str,
    /// The reporting service's name.
    pub service: &'static str,
}

/// Liveness endpoint for the gateway and orchestration probes.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses((status = 200, description = "Service is up", body = HealthBody))
)]
#[get("/health")]
pub async fn health(name: web::Data<ServiceName>) -> web::Json<HealthBody> {
    web::Json(HealthBody {
        status: "ok",
        service: name.0,
    })
}
