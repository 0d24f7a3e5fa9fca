//! HTTP mapping for domain errors.
//!
//! The domain's [`Error`] stays transport agnostic; this module gives it an
//! actix [`ResponseError`] rendering the `{error, code, message}` envelope
//! with a stable status per [`ErrorKind`]. Internal failures are logged and
//! replaced by a fixed message so no infrastructure detail crosses the wire.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Wire envelope for every failure response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable category tag.
    pub error: String,
    /// HTTP status repeated in the body.
    pub code: u16,
    /// Human-readable description.
    pub message: String,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::WeakPassword | ErrorKind::Invariant => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::InvalidCredentials | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if self.kind() == ErrorKind::Internal {
            error!(error = %self, "internal error reached the HTTP boundary");
            "internal server error".to_owned()
        } else {
            self.message().to_owned()
        };
        HttpResponse::build(status).json(ErrorBody {
            error: self.kind().tag().to_owned(),
            code: status.as_u16(),
            message,
        })
    }
}

/// Map JSON body deserialisation failures into the envelope (400).
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::invalid_input(format!("invalid request body: {err}")).into()
}

/// Map path parameter failures into the envelope (400).
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::invalid_input(format!("invalid path parameter: {err}")).into()
}

/// Map query string failures into the envelope (400).
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::invalid_input(format!("invalid query string: {err}")).into()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[case(Error::invalid_input("bad"), StatusCode::BAD_REQUEST, "invalid_input")]
    #[case(Error::weak_password("short"), StatusCode::BAD_REQUEST, "weak_password")]
    #[case(Error::invalid_credentials(), StatusCode::UNAUTHORIZED, "invalid_credentials")]
    #[case(Error::unauthenticated("login"), StatusCode::UNAUTHORIZED, "unauthenticated")]
    #[case(Error::forbidden("not yours"), StatusCode::FORBIDDEN, "forbidden")]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND, "not_found")]
    #[case(Error::conflict("dup"), StatusCode::CONFLICT, "conflict")]
    #[case(Error::invariant("quantity"), StatusCode::BAD_REQUEST, "invariant")]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR, "internal")]
    #[tokio::test]
    async fn status_and_tag_are_stable(
        #[case] err: Error,
        #[case] status: StatusCode,
        #[case] tag: &str,
    ) {
        assert_eq!(err.status_code(), status);
        let response = err.error_response();
        assert_eq!(response.status(), status);

        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("envelope JSON");
        assert_eq!(value.get("error").and_then(Value::as_str), Some(tag));
        assert_eq!(
            value.get("code").and_then(Value::as_u64),
            Some(u64::from(status.as_u16()))
        );
    }

    #[tokio::test]
    async fn internal_detail_is_redacted() {
        let response = Error::internal("connection to 10.0.0.3 refused").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("envelope JSON");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("internal server error")
        );
    }

    #[tokio::test]
    async fn non_internal_messages_pass_through() {
        let response = Error::conflict("user already exists").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("envelope JSON");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("user already exists")
        );
    }
}
